use serde::{Deserialize, Serialize};

use crate::domain::{BiddingRule, SeatIndex, Suit};
use crate::engine::actions::Bid;
use crate::engine::errors::ActionError;

/// Заявки текущей торговли в порядке поступления.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BidHistory {
    pub bids: Vec<(SeatIndex, Bid)>,
}

/// Итог торговли после очередной заявки.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BiddingOutcome {
    /// Торговля продолжается.
    Open,
    /// Козырь назначен.
    Closed { maker: SeatIndex, trump: Suit },
    /// Все пасовали – пересдача.
    Redeal,
}

impl BidHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, seat: SeatIndex, bid: Bid) {
        self.bids.push((seat, bid));
    }

    pub fn clear(&mut self) {
        self.bids.clear();
    }

    pub fn len(&self) -> usize {
        self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    /// Последняя заявка с козырем.
    pub fn last_call(&self) -> Option<(SeatIndex, Suit)> {
        self.bids.iter().rev().find_map(|(seat, bid)| match bid {
            Bid::Call(suit) => Some((*seat, *suit)),
            Bid::Pass => None,
        })
    }

    /// Пасы подряд в конце истории.
    fn trailing_passes(&self) -> usize {
        self.bids
            .iter()
            .rev()
            .take_while(|(_, bid)| *bid == Bid::Pass)
            .count()
    }

    /// Можно ли месту `seat` сделать заявку `bid`.
    ///
    /// `dealer` – место сдающего, он говорит последним в круге.
    pub fn validate(
        &self,
        rule: BiddingRule,
        seat: SeatIndex,
        dealer: SeatIndex,
        bid: Bid,
    ) -> Result<(), ActionError> {
        match (rule, bid) {
            (BiddingRule::FirstCall, Bid::Pass) => {
                if seat == dealer && self.last_call().is_none() {
                    return Err(ActionError::DealerMustCall(seat));
                }
                Ok(())
            }
            (BiddingRule::FirstCall, Bid::Call(_)) => Ok(()),
            (BiddingRule::Auction { .. }, Bid::Pass) => Ok(()),
            (BiddingRule::Auction { .. }, Bid::Call(suit)) => match self.last_call() {
                Some((_, last)) if suit <= last => Err(ActionError::BidTooLow {
                    bid,
                    last: Bid::Call(last),
                }),
                _ => Ok(()),
            },
        }
    }

    /// Закрылась ли торговля после последней заявки. `seats` – число участников.
    pub fn outcome(&self, rule: BiddingRule, seats: usize) -> BiddingOutcome {
        let last_call = self.last_call();
        match rule {
            BiddingRule::FirstCall => match last_call {
                Some((maker, trump)) => BiddingOutcome::Closed { maker, trump },
                None => BiddingOutcome::Open,
            },
            BiddingRule::Auction { max_bids } => {
                let exhausted = self.bids.len() >= max_bids;
                match last_call {
                    Some((maker, trump))
                        if exhausted || self.trailing_passes() + 1 >= seats =>
                    {
                        BiddingOutcome::Closed { maker, trump }
                    }
                    Some(_) => BiddingOutcome::Open,
                    None if exhausted || self.trailing_passes() >= seats => BiddingOutcome::Redeal,
                    None => BiddingOutcome::Open,
                }
            }
        }
    }
}
