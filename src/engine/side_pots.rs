use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};

/// Сайд-пот: часть банка, на которую претендуют только некоторые места.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible_seats: Vec<SeatIndex>,
}

/// Разложить вклады на основной банк и сайд-поты.
///
/// Уровни берутся по вкладам живых (не сбросивших) мест; фишки сбросивших
/// попадают в те слои, до которых дотягиваются. Всё, что выше последнего
/// живого уровня, уходит в верхний банк.
/// Порядок результата – от основного банка к старшим сайд-потам.
pub fn compute_side_pots(contributions: &BTreeMap<SeatIndex, Chips>, live: &[SeatIndex]) -> Vec<SidePot> {
    let mut levels: Vec<Chips> = live
        .iter()
        .map(|seat| contributions.get(seat).copied().unwrap_or(Chips::ZERO))
        .filter(|c| !c.is_zero())
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::new();
    let mut prev_level = Chips::ZERO;

    for level in levels {
        let amount: Chips = contributions
            .values()
            .map(|&c| c.min(level) - c.min(prev_level))
            .sum();

        let eligible_seats: Vec<SeatIndex> = live
            .iter()
            .copied()
            .filter(|seat| contributions.get(seat).copied().unwrap_or(Chips::ZERO) >= level)
            .collect();

        pots.push(SidePot {
            amount,
            eligible_seats,
        });
        prev_level = level;
    }

    let leftover: Chips = contributions
        .values()
        .map(|&c| c.saturating_sub(prev_level))
        .sum();

    if !leftover.is_zero() {
        match pots.last_mut() {
            Some(top) => top.amount += leftover,
            None => pots.push(SidePot {
                amount: leftover,
                eligible_seats: live.to_vec(),
            }),
        }
    }

    pots
}
