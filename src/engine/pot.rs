use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Банк раздачи: сколько всего внесло каждое место с последнего расчёта.
/// Деление на сайд-поты делается при расчёте (`side_pots`).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub contributions: BTreeMap<SeatIndex, Chips>,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, seat: SeatIndex, amount: Chips) {
        if amount.is_zero() {
            return;
        }
        *self.contributions.entry(seat).or_insert(Chips::ZERO) += amount;
    }

    pub fn total(&self) -> Chips {
        self.contributions.values().sum()
    }

    pub fn contribution(&self, seat: SeatIndex) -> Chips {
        self.contributions.get(&seat).copied().unwrap_or(Chips::ZERO)
    }

    pub fn reset(&mut self) {
        self.contributions.clear();
    }
}
