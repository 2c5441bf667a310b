//! Движок карточного стола с пошаговым автоматом.
//!
//! Два варианта на одном столе:
//!   - Texas Hold'em (no-limit / pot-limit / fixed-limit, сайд-поты);
//!   - Тарабиш (сдача и торговля за козырь).
//!
//! Внешний код сажает игроков (`PokerTable::sit`) и зовёт `PokerTable::next()`,
//! пока тот не вернёт `done`. Каждый вызов выполняет одно состояние
//! автомата, который крутит универсальный `statemachine::StateExecutor`.

pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod state;
pub mod statemachine;

pub use domain::{Chips, Config, Game, Limit, Parameters, SeatIndex, SeatView, Stakes};
pub use engine::{Action, ActionKind, Bid, Dealer, Player, PokerTable, Progress, TableError};
