use std::collections::BTreeMap;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Итог раздачи для одного места в одном банке.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResult {
    pub seat: SeatIndex,
    /// Сколько фишек место получило из этого банка.
    pub amount: Chips,
    pub description: String,
}

/// Результаты раздачи: место → список итогов (по одному на выигранный банк).
pub type Results = BTreeMap<SeatIndex, Vec<HandResult>>;

impl fmt::Display for HandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}: +{} ({})", self.seat, self.amount, self.description)
    }
}
