use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, Suit};

/// Тип действия без параметров – то, что показываем игроку как "доступные действия".
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    Bid,
}

/// Заявка в торговле Тарабиша.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Bid {
    Pass,
    /// Назвать козырь.
    Call(Suit),
}

/// Действие игрока.
///
/// Для `Bet`/`Raise` сумма – это прибавка к текущей максимальной ставке раунда
/// (сверх колла), а не итоговая ставка.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(Chips),
    Raise(Chips),
    Bid(Bid),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call => ActionKind::Call,
            Action::Bet(_) => ActionKind::Bet,
            Action::Raise(_) => ActionKind::Raise,
            Action::Bid(_) => ActionKind::Bid,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::Bid => "bid",
        };
        f.write_str(s)
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(ActionKind::Fold),
            "check" => Ok(ActionKind::Check),
            "call" => Ok(ActionKind::Call),
            "bet" => Ok(ActionKind::Bet),
            "raise" => Ok(ActionKind::Raise),
            "bid" => Ok(ActionKind::Bid),
            other => Err(format!("{other} – это не действие")),
        }
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bid::Pass => f.write_str("pass"),
            Bid::Call(suit) => f.write_str(suit.name()),
        }
    }
}

/// Словарь заявок: "pass" или полное имя масти.
impl FromStr for Bid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "pass" {
            return Ok(Bid::Pass);
        }
        match s.as_str() {
            "clubs" | "diamonds" | "hearts" | "spades" => s.parse::<Suit>().map(Bid::Call),
            other => Err(format!("Недопустимая заявка: {other}")),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Bet(c) => write!(f, "bet {c}"),
            Action::Raise(c) => write!(f, "raise {c}"),
            Action::Bid(b) => write!(f, "bid {b}"),
            other => write!(f, "{}", other.kind()),
        }
    }
}
