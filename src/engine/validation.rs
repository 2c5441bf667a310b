use crate::domain::chips::Chips;
use crate::domain::{Limit, Round, Stakes};
use crate::engine::actions::{Action, ActionKind};
use crate::engine::betting::BettingState;
use crate::engine::errors::ActionError;
use crate::engine::seat::Seat;

/// Разрешатель действий: какие действия доступны месту и в каких пределах
/// можно ставить, при текущем состоянии ставок и структуре лимитов.
pub struct Resolver<'a> {
    pub limit: Limit,
    pub stakes: &'a Stakes,
    pub round: Round,
    pub betting: &'a BettingState,
    /// Весь банк раздачи, включая ставки текущего раунда.
    pub pot_total: Chips,
}

impl<'a> Resolver<'a> {
    /// Сколько месту нужно добавить, чтобы уравнять максимальную ставку раунда.
    pub fn outstanding(&self, seat: &Seat) -> Chips {
        self.betting.current_bet.saturating_sub(seat.round_bet)
    }

    pub fn can_bet(&self, seat: &Seat) -> bool {
        seat.is_active()
            && self.outstanding(seat).is_zero()
            && !seat.chips.is_zero()
            && !self.betting.is_capped(self.limit)
            && self.betting.is_open_for(seat.index)
    }

    /// Повышение: есть ставка, стек больше колла, лимит не исчерпан
    /// и торговля для места открыта.
    pub fn can_raise(&self, seat: &Seat) -> bool {
        let outstanding = self.outstanding(seat);
        seat.is_active()
            && !outstanding.is_zero()
            && seat.chips > outstanding
            && !self.betting.is_capped(self.limit)
            && self.betting.is_open_for(seat.index)
    }

    pub fn valid_actions(&self, seat: &Seat) -> Vec<ActionKind> {
        if !seat.is_active() {
            return Vec::new();
        }
        let outstanding = self.outstanding(seat);
        let mut actions = vec![ActionKind::Fold];
        if outstanding.is_zero() {
            actions.push(ActionKind::Check);
        } else if !seat.chips.is_zero() {
            actions.push(ActionKind::Call);
        }
        if self.can_bet(seat) {
            actions.push(ActionKind::Bet);
        }
        if self.can_raise(seat) {
            actions.push(ActionKind::Raise);
        }
        actions
    }

    /// Размер фиксированной ставки в фикс-лимите.
    fn fixed_bet_size(&self) -> Chips {
        match self.round {
            Round::Turn | Round::River => self.stakes.big_bet + self.stakes.big_bet,
            _ => self.stakes.big_bet,
        }
    }

    /// Границы прибавки для bet/raise: (MinRaise, MaxRaise).
    /// MinRaise никогда не больше MaxRaise; оба не больше того, что есть у места сверх колла.
    pub fn raise_bounds(&self, seat: &Seat) -> (Chips, Chips) {
        let available = seat.chips.saturating_sub(self.outstanding(seat));
        if available.is_zero() {
            return (Chips::ZERO, Chips::ZERO);
        }
        let floor = self.betting.min_raise.max(Chips(1));
        let max = match self.limit {
            Limit::NoLimit => available,
            Limit::PotLimit => (self.pot_total + self.outstanding(seat)).min(available),
            Limit::FixedLimit => self.fixed_bet_size().max(Chips(1)).min(available),
        };
        let min = match self.limit {
            Limit::FixedLimit => max,
            _ => floor.min(max),
        };
        (min, max)
    }

    /// Проверка действия. Ошибка означает, что стол не меняется.
    pub fn validate(&self, seat: &Seat, action: &Action) -> Result<(), ActionError> {
        if !seat.is_active() {
            return Err(ActionError::NotAvailable(action.kind()));
        }
        let outstanding = self.outstanding(seat);

        match action {
            Action::Fold => Ok(()),

            Action::Check => {
                if outstanding.is_zero() {
                    Ok(())
                } else {
                    Err(ActionError::CannotCheck)
                }
            }

            Action::Call => {
                if outstanding.is_zero() {
                    Err(ActionError::CannotCall)
                } else {
                    // Колл меньшим стеком – это all-in, обработает движок.
                    Ok(())
                }
            }

            Action::Bet(amount) => {
                if !outstanding.is_zero() {
                    return Err(ActionError::NotAvailable(ActionKind::Bet));
                }
                if self.betting.is_capped(self.limit) {
                    return Err(ActionError::RaiseCapped);
                }
                if !self.can_bet(seat) {
                    return Err(ActionError::NotAvailable(ActionKind::Bet));
                }
                self.check_amount(seat, *amount)
            }

            Action::Raise(amount) => {
                if outstanding.is_zero() {
                    return Err(ActionError::NotAvailable(ActionKind::Raise));
                }
                if self.betting.is_capped(self.limit) {
                    return Err(ActionError::RaiseCapped);
                }
                if !self.can_raise(seat) {
                    return Err(ActionError::NotAvailable(ActionKind::Raise));
                }
                self.check_amount(seat, *amount)
            }

            Action::Bid(_) => Err(ActionError::NotAvailable(ActionKind::Bid)),
        }
    }

    fn check_amount(&self, seat: &Seat, amount: Chips) -> Result<(), ActionError> {
        let (min, max) = self.raise_bounds(seat);
        if amount.is_zero() || amount < min || amount > max {
            return Err(ActionError::AmountOutOfRange { amount, min, max });
        }
        Ok(())
    }
}
