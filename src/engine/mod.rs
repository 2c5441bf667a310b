//! Движок стола: места, ставки, торговля, расчёт банка.
//!
//! Высокоуровневый объект: `PokerTable`
//! Основные операции:
//!   - `sit` – посадить игрока
//!   - `next` – выполнить одно состояние автомата стола
//!
//! Правила вариантов живут в `holdem` и `tarabish`; оба работают
//! с одним `TableCore` через общий `StateExecutor`.

pub mod actions;
pub mod betting;
pub mod bidding;
pub mod dealer;
pub mod errors;
pub mod hand_history;
mod holdem;
pub mod player;
pub mod positions;
pub mod pot;
pub mod seat;
pub mod settlement;
pub mod side_pots;
pub mod states;
pub mod table;
mod tarabish;
pub mod validation;

pub use actions::{Action, ActionKind, Bid};
pub use bidding::{BidHistory, BiddingOutcome};
pub use dealer::{CardDealer, Dealer};
pub use errors::{ActionError, EngineError, SeatingError, TableError};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use player::{Player, PlayerError, Turn};
pub use pot::Pot;
pub use side_pots::{compute_side_pots, SidePot};
pub use states::TableState;
pub use table::{PokerTable, Progress, TableCore};

/// RNG интерфейс для engine.
/// Реализации – в `infra::rng` (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
