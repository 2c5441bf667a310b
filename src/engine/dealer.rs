use std::collections::BTreeMap;

use tracing::trace;

use crate::domain::card::Card;
use crate::domain::deck::Deck;
use crate::domain::{Game, Round, SeatIndex};
use crate::engine::RandomSource;
use crate::eval::{evaluate_best_hand, HandRank};

/// Дилер: карты и сила рук. Стол с картами напрямую не работает,
/// только через этот контракт.
pub trait Dealer {
    /// Новая раздача: свежая колода и стартовые карты для `seats`.
    fn start_hand(&mut self, game: Game, seats: &[SeatIndex]);

    /// Карты новой фазы (флоп/тёрн/ривер или добор в Тарабише).
    fn deal_round(&mut self, round: Round);

    /// Сила руки места на шоудауне. `None` – руку оценить нельзя.
    fn rank(&self, seat: SeatIndex) -> Option<HandRank>;

    /// Карты места (для показа игроку).
    fn hand(&self, _seat: SeatIndex) -> Vec<Card> {
        Vec::new()
    }

    /// Общие карты.
    fn board(&self) -> Vec<Card> {
        Vec::new()
    }
}

/// Дилер с настоящей колодой.
///
/// Холдем: 52 карты, по 2 в руку, борд 3 + 1 + 1.
/// Тарабиш: 36 карт (6..A), по 6 в руку до торговли и ещё по 3 перед розыгрышем.
pub struct CardDealer<R: RandomSource> {
    rng: R,
    game: Game,
    deck: Deck,
    seats: Vec<SeatIndex>,
    hands: BTreeMap<SeatIndex, Vec<Card>>,
    board: Vec<Card>,
}

impl<R: RandomSource> CardDealer<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            game: Game::Holdem,
            deck: Deck::standard_52(),
            seats: Vec::new(),
            hands: BTreeMap::new(),
            board: Vec::new(),
        }
    }

    /// Сдать по `count` карт каждому месту, по одной по кругу.
    fn deal_each(&mut self, count: usize) {
        for _ in 0..count {
            for seat in &self.seats {
                if let Some(card) = self.deck.draw_one() {
                    self.hands.entry(*seat).or_default().push(card);
                }
            }
        }
    }

    fn deal_board(&mut self, count: usize) {
        let cards = self.deck.draw_n(count);
        self.board.extend(cards);
    }
}

impl<R: RandomSource> Dealer for CardDealer<R> {
    fn start_hand(&mut self, game: Game, seats: &[SeatIndex]) {
        self.game = game;
        self.deck = match game {
            Game::Holdem => Deck::standard_52(),
            Game::Tarabish => Deck::tarabish_36(),
        };
        self.rng.shuffle(&mut self.deck.cards);
        self.seats = seats.to_vec();
        self.hands.clear();
        self.board.clear();

        let count = match game {
            Game::Holdem => 2,
            Game::Tarabish => 6,
        };
        self.deal_each(count);
        trace!(?game, seats = seats.len(), left = self.deck.len(), "hand dealt");
    }

    fn deal_round(&mut self, round: Round) {
        match (self.game, round) {
            (Game::Holdem, Round::Flop) => self.deal_board(3),
            (Game::Holdem, Round::Turn | Round::River) => self.deal_board(1),
            (Game::Tarabish, Round::Play) => self.deal_each(3),
            _ => {}
        }
    }

    fn rank(&self, seat: SeatIndex) -> Option<HandRank> {
        if self.game != Game::Holdem {
            return None;
        }
        let hole = self.hands.get(&seat)?;
        evaluate_best_hand(hole, &self.board)
    }

    fn hand(&self, seat: SeatIndex) -> Vec<Card> {
        self.hands.get(&seat).cloned().unwrap_or_default()
    }

    fn board(&self) -> Vec<Card> {
        self.board.clone()
    }
}
