//! Доменная модель стола: фишки, карты, конфиг, места, фазы, результаты.

pub mod card;
pub mod chips;
pub mod config;
pub mod deck;
pub mod result;
pub mod round;
pub mod seat;

/// Индекс места за столом (0..num_of_seats-1).
pub type SeatIndex = u8;

/// Идентификатор игрока – строка, которую отдаёт `Player::id`.
pub type PlayerId = String;

pub use card::*;
pub use chips::*;
pub use config::*;
pub use deck::*;
pub use result::*;
pub use round::*;
pub use seat::*;
