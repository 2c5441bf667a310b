use thiserror::Error;

use crate::domain::{Chips, SeatIndex};
use crate::engine::actions::{ActionKind, Bid};
use crate::engine::player::PlayerError;
use crate::statemachine::ExecutorError;

/// Ошибки посадки за стол. Не фатальны – вызывающий решает, что делать дальше.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SeatingError {
    #[error("Игрок уже сидит за этим столом")]
    AlreadySeated,

    #[error("Место не существует за столом")]
    InvalidSeat,

    #[error("Место уже занято")]
    SeatOccupied,
}

/// Недопустимое действие. Состояние стола не меняется, игрока можно переспросить.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Действие {0} сейчас недоступно")]
    NotAvailable(ActionKind),

    #[error("Невозможно выполнить check – нужно хотя бы уравнять ставку")]
    CannotCheck,

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    CannotCall,

    #[error("Сумма {amount} вне допустимого диапазона [{min}, {max}]")]
    AmountOutOfRange { amount: Chips, min: Chips, max: Chips },

    #[error("Лимит повышений в этом раунде исчерпан")]
    RaiseCapped,

    #[error("Заявка {bid} должна быть старше {last}")]
    BidTooLow { bid: Bid, last: Bid },

    #[error("Дилер (место {0}) не может пасовать последним – нужно назвать козырь")]
    DealerMustCall(SeatIndex),
}

/// Фатальные ошибки автомата стола: раздача/сессия дальше не продолжается.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Игрок на месте {seat} не ответил: {source}")]
    Player {
        seat: SeatIndex,
        #[source]
        source: PlayerError,
    },

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

/// Ошибки шага стола (`PokerTable::next`).
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Недопустимое действие: {0}")]
    InvalidAction(#[from] ActionError),

    #[error("Недостаточно игроков для раздачи")]
    NotEnoughPlayers,

    #[error(transparent)]
    Engine(#[from] ExecutorError<EngineError>),
}

impl TableError {
    /// Ошибка фатальна: автомат остановлен.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TableError::Engine(_))
    }
}
