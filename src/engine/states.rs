use serde::{Deserialize, Serialize};

use crate::statemachine::StateName;

/// Состояния автомата стола. Какие из них используются, зависит от варианта:
/// холдем ходит по `Start → Act → Street → … → Showdown`,
/// Тарабиш – по `Start → Bid → Middle → End`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TableState {
    Start,
    Act,
    Street,
    Showdown,
    Bid,
    Middle,
    End,
    /// Терминальное: отдаёт сохранённую ошибку исполнителю.
    Error,
}

impl StateName for TableState {
    fn name(&self) -> &'static str {
        match self {
            TableState::Start => "Start",
            TableState::Act => "Act",
            TableState::Street => "Street",
            TableState::Showdown => "Showdown",
            TableState::Bid => "Bid",
            TableState::Middle => "Middle",
            TableState::End => "End",
            TableState::Error => "Error",
        }
    }
}
