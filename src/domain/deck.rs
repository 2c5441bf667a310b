use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Колода карт – упорядоченный список, сверху колоды последний элемент.
/// Перемешивание делает дилер через `RandomSource`, не здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная колода: трефы 2..A, бубны 2..A, червы 2..A, пики 2..A.
    pub fn standard_52() -> Self {
        Self::with_ranks(&Rank::ALL)
    }

    /// Колода Тарабиша: 36 карт, от шестёрки до туза.
    pub fn tarabish_36() -> Self {
        Self::with_ranks(&Rank::ALL[4..])
    }

    fn with_ranks(ranks: &[Rank]) -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| ranks.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Взять до n карт сверху (меньше, если колода кончилась).
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let keep = self.cards.len().saturating_sub(n);
        let mut taken = self.cards.split_off(keep);
        taken.reverse();
        taken
    }
}
