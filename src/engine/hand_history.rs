use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{Round, SeatIndex, Suit};
use crate::engine::actions::{Action, Bid};

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted {
        hand_no: u32,
        button: SeatIndex,
    },

    /// Анте (мёртвые фишки, в ставку раунда не идут).
    AntePosted {
        seat: SeatIndex,
        amount: Chips,
    },

    /// Малый или большой блайнд.
    BlindPosted {
        seat: SeatIndex,
        amount: Chips,
    },

    /// Действие игрока в торговле ставками.
    PlayerActed {
        seat: SeatIndex,
        action: Action,
        /// Сколько фишек реально ушло в банк этим действием.
        paid: Chips,
        pot_after: Chips,
    },

    /// Заявка в торговле Тарабиша.
    BidPlaced {
        seat: SeatIndex,
        bid: Bid,
    },

    /// Козырь назначен.
    TrumpMade {
        seat: SeatIndex,
        trump: Suit,
    },

    /// Переход на новую фазу.
    RoundChanged {
        round: Round,
    },

    /// Выплата из банка.
    PotAwarded {
        seat: SeatIndex,
        amount: Chips,
    },

    /// Раздача завершена.
    HandFinished {
        hand_no: u32,
    },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// История текущей (или последней завершённой) раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let index = self.events.len() as u32;
        self.events.push(HandEvent { index, kind });
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Все действия игроков (без блайндов и заявок).
    pub fn actions(&self) -> impl Iterator<Item = (SeatIndex, Action)> + '_ {
        self.events.iter().filter_map(|e| match e.kind {
            HandEventKind::PlayerActed { seat, action, .. } => Some((seat, action)),
            _ => None,
        })
    }
}
