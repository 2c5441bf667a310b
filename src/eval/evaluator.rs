use crate::domain::card::{Card, Rank};

use super::hand_rank::{HandCategory, HandRank};

/// Лучшая 5-карточная рука из карманных карт и борда.
///
/// Работает для 5–7 карт; если карт меньше пяти (раздача закончилась
/// до ривера без вскрытия), возвращает `None`.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Option<HandRank> {
    let cards: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();
    let n = cards.len();
    if n < 5 {
        return None;
    }

    let mut best: Option<HandRank> = None;
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let rank = evaluate_five(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if best.map_or(true, |current| rank > current) {
                            best = Some(rank);
                        }
                    }
                }
            }
        }
    }
    best
}

/// Оценка ровно пяти карт.
fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.rank.value() as usize] += 1;
    }

    // (количество, ранг) по убыванию: сначала каре/сеты/пары, потом кикеры.
    let mut groups: Vec<(u8, Rank)> = Rank::ALL
        .iter()
        .copied()
        .filter(|r| counts[r.value() as usize] > 0)
        .map(|r| (counts[r.value() as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let pattern: Vec<u8> = groups.iter().map(|(count, _)| *count).collect();
    let ranks: Vec<Rank> = groups.iter().map(|(_, rank)| *rank).collect();

    if let Some(high) = straight_high(&groups) {
        let category = if is_flush {
            HandCategory::StraightFlush
        } else {
            HandCategory::Straight
        };
        return HandRank::new(category, &[high]);
    }

    let category = match pattern.as_slice() {
        [4, 1] => HandCategory::FourOfAKind,
        [3, 2] => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };
    HandRank::new(category, &ranks)
}

/// Старшая карта стрита, если пять разных рангов идут подряд.
/// Колесо A-2-3-4-5 считается стритом до пятёрки.
fn straight_high(groups: &[(u8, Rank)]) -> Option<Rank> {
    if groups.len() != 5 {
        return None;
    }
    let values: Vec<u8> = groups.iter().map(|(_, r)| r.value()).collect();
    if values[0] - values[4] == 4 {
        return Some(groups[0].1);
    }
    if values == [14, 5, 4, 3, 2] {
        return Some(Rank::Five);
    }
    None
}
