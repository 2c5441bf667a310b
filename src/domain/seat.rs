use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{PlayerId, SeatIndex};

/// Статус места в контексте раздачи.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SeatStatus {
    /// Сел за стол, ждёт следующей раздачи.
    #[default]
    Waiting,
    /// Участвует в раздаче и может действовать.
    Active,
    /// Сбросил карты.
    Folded,
    /// Поставил весь стек – больше не действует, но претендует на банк.
    AllIn,
    /// Фишки кончились.
    Busted,
}

/// Параметры посадки: место и стартовый стек.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parameters {
    pub seat: SeatIndex,
    pub chips: Chips,
}

impl Parameters {
    pub fn new(seat: SeatIndex, chips: Chips) -> Self {
        Self { seat, chips }
    }
}

/// Снимок места для внешнего кода (только чтение).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub seat: SeatIndex,
    pub player: Option<PlayerId>,
    pub chips: Chips,
    /// Сколько место уже поставило в текущем раунде.
    pub round_bet: Chips,
    pub status: SeatStatus,
    pub can_raise: bool,
}

impl SeatView {
    pub fn seat(&self) -> SeatIndex {
        self.seat
    }

    pub fn player_id(&self) -> Option<&str> {
        self.player.as_deref()
    }

    pub fn chips(&self) -> Chips {
        self.chips
    }

    /// Может ли место сейчас повысить ставку.
    pub fn can_raise(&self) -> bool {
        self.can_raise
    }
}

impl fmt::Display for SeatView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seat {} | {} | chips {} | bet {} | {:?}",
            self.seat,
            self.player.as_deref().unwrap_or("-"),
            self.chips,
            self.round_bet,
            self.status
        )
    }
}
