use core::fmt;

use serde::{Deserialize, Serialize};

/// Фаза раздачи. В пределах одной раздачи только растёт.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Round {
    /// Раздача ещё не началась.
    #[default]
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    /// Тарабиш: торговля за козырь.
    Bidding,
    /// Тарабиш: розыгрыш взяток.
    Play,
    /// Стол закончил работу.
    Complete,
}

impl Round {
    /// Следующая улица холдема (None после ривера).
    pub fn next_street(self) -> Option<Round> {
        match self {
            Round::Preflop => Some(Round::Flop),
            Round::Flop => Some(Round::Turn),
            Round::Turn => Some(Round::River),
            _ => None,
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Round::Waiting => "waiting",
            Round::Preflop => "preflop",
            Round::Flop => "flop",
            Round::Turn => "turn",
            Round::River => "river",
            Round::Showdown => "showdown",
            Round::Bidding => "bidding",
            Round::Play => "play",
            Round::Complete => "complete",
        };
        f.write_str(s)
    }
}
