use std::collections::BTreeMap;

use crate::domain::chips::Chips;
use crate::domain::{HandResult, Results, SeatIndex};
use crate::engine::side_pots::compute_side_pots;
use crate::eval::{describe_hand, HandRank};

/// Разделить банк между местами.
///
/// - `contributions` – сколько внесло каждое место за раздачу;
/// - `live` – не сбросившие места;
/// - `ranks` – сила рук живых мест (`None` проигрывает любой оценённой руке);
/// - `odd_order` – порядок, в котором раздаются нечётные фишки при делёжке.
///
/// Если живое место одно, весь банк уходит ему без сравнения рук.
pub fn settle(
    contributions: &BTreeMap<SeatIndex, Chips>,
    live: &[SeatIndex],
    ranks: &BTreeMap<SeatIndex, Option<HandRank>>,
    odd_order: &[SeatIndex],
) -> Results {
    let mut results = Results::new();

    if let [winner] = live {
        let amount: Chips = contributions.values().sum();
        if !amount.is_zero() {
            results.entry(*winner).or_default().push(HandResult {
                seat: *winner,
                amount,
                description: "uncontested".to_string(),
            });
        }
        return results;
    }

    let pots = compute_side_pots(contributions, live);
    for (pot_no, pot) in pots.iter().enumerate() {
        if pot.amount.is_zero() || pot.eligible_seats.is_empty() {
            continue;
        }

        let best = pot
            .eligible_seats
            .iter()
            .map(|seat| ranks.get(seat).copied().flatten())
            .max()
            .flatten();
        let mut winners: Vec<SeatIndex> = pot
            .eligible_seats
            .iter()
            .copied()
            .filter(|seat| ranks.get(seat).copied().flatten() == best)
            .collect();
        winners.sort_by_key(|seat| odd_position(odd_order, *seat));

        let (share, remainder) = pot.amount.split(winners.len());
        let pot_name = if pot_no == 0 {
            "main pot".to_string()
        } else {
            format!("side pot {pot_no}")
        };
        let hand = best.map(describe_hand).unwrap_or_else(|| "best hand".to_string());

        for (i, seat) in winners.iter().enumerate() {
            let mut amount = share;
            if (i as u64) < remainder.0 {
                amount += Chips(1);
            }
            let description = if winners.len() > 1 {
                format!("{pot_name}: split, {hand}")
            } else {
                format!("{pot_name}: {hand}")
            };
            results.entry(*seat).or_default().push(HandResult {
                seat: *seat,
                amount,
                description,
            });
        }
    }

    results
}

fn odd_position(order: &[SeatIndex], seat: SeatIndex) -> usize {
    order
        .iter()
        .position(|s| *s == seat)
        .unwrap_or(order.len() + seat as usize)
}

/// Сколько всего получило каждое место.
pub fn payouts(results: &Results) -> BTreeMap<SeatIndex, Chips> {
    results
        .iter()
        .map(|(seat, list)| (*seat, list.iter().map(|r| r.amount).sum()))
        .collect()
}
