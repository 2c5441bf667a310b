use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Chips, Round, SeatIndex};
use crate::engine::actions::{Action, ActionKind};

/// Ошибки со стороны игрока (его ввода/скрипта/канала).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("У игрока {player} кончились заготовленные действия")]
    ScriptExhausted { player: String },

    #[error("Канал действий игрока {player} закрыт")]
    QueueClosed { player: String },

    #[error("Ошибка ввода: {0}")]
    Input(String),
}

/// Что видит игрок, когда его просят сделать ход.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub seat: SeatIndex,
    pub round: Round,
    pub chips: Chips,
    pub outstanding: Chips,
    pub min_raise: Chips,
    pub max_raise: Chips,
    pub valid_actions: Vec<ActionKind>,
}

/// Игрок за столом. Движок только потребляет этот контракт.
pub trait Player {
    /// Уникальный идентификатор игрока.
    fn id(&self) -> &str;

    /// Блокирующий запрос следующего решения.
    fn action(&mut self, turn: &Turn) -> Result<Action, PlayerError>;

    /// Восстановить игрока по id (используется при десериализации стола).
    fn from_id(id: &str) -> Result<Self, PlayerError>
    where
        Self: Sized;
}
