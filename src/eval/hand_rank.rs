use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;

/// Сила руки на шоудауне. Больше – сильнее; равные значения делят банк.
///
/// Схема кодирования (u32):
///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
/// Ранги 2..14 помещаются в 4 бита, поэтому сравнение чисел = сравнение рук.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct HandRank(pub u32);

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
        }
    }
}

impl HandRank {
    /// Собрать ранг из категории и значимых рангов (от старшего к младшему).
    /// Недостающие позиции заполняются нулями.
    pub fn new(category: HandCategory, ranks: &[Rank]) -> Self {
        let mut value = (category as u32) & 0x0F;
        for i in 0..5 {
            let nibble = ranks.get(i).map(|r| r.value() as u32).unwrap_or(0);
            value = (value << 4) | (nibble & 0x0F);
        }
        HandRank(value)
    }

    pub fn category(&self) -> HandCategory {
        let id = ((self.0 >> 20) & 0x0F) as usize;
        HandCategory::ALL
            .get(id)
            .copied()
            .unwrap_or(HandCategory::HighCard)
    }

    /// Старшая значимая карта руки.
    pub fn top_rank(&self) -> Option<Rank> {
        let n = ((self.0 >> 16) & 0x0F) as u8;
        Rank::ALL.iter().copied().find(|r| r.value() == n)
    }
}

/// Человеческое описание руки для результатов раздачи.
pub fn describe_hand(rank: HandRank) -> String {
    let category = rank.category();
    match rank.top_rank() {
        Some(top) => format!("{} ({} high)", category.label(), top),
        None => category.label().to_string(),
    }
}
