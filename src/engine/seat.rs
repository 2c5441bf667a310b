use crate::domain::{Chips, SeatIndex, SeatStatus, SeatView};
use crate::engine::player::Player;

/// Место за столом вместе с игроком и его стеком.
pub struct Seat {
    pub index: SeatIndex,
    pub player: Option<Box<dyn Player>>,
    pub chips: Chips,
    /// Вклад в текущем раунде ставок.
    pub round_bet: Chips,
    pub status: SeatStatus,
}

impl Seat {
    pub fn empty(index: SeatIndex) -> Self {
        Self {
            index,
            player: None,
            chips: Chips::ZERO,
            round_bet: Chips::ZERO,
            status: SeatStatus::Waiting,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.player.is_some()
    }

    pub fn player_id(&self) -> Option<&str> {
        self.player.as_ref().map(|p| p.id())
    }

    /// Может действовать в текущем раунде.
    pub fn is_active(&self) -> bool {
        self.is_occupied() && self.status == SeatStatus::Active
    }

    /// Претендует на банк (не сбросил карты).
    pub fn is_live(&self) -> bool {
        self.is_occupied() && matches!(self.status, SeatStatus::Active | SeatStatus::AllIn)
    }

    /// Снять со стека не более `amount`; стек в ноль → all-in.
    pub fn take(&mut self, amount: Chips) -> Chips {
        let paid = self.take_dead(amount);
        self.round_bet += paid;
        paid
    }

    /// То же, но без учёта в ставке раунда (анте).
    pub fn take_dead(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        if self.chips.is_zero() && self.status == SeatStatus::Active {
            self.status = SeatStatus::AllIn;
        }
        paid
    }

    pub fn view(&self, can_raise: bool) -> SeatView {
        SeatView {
            seat: self.index,
            player: self.player_id().map(str::to_owned),
            chips: self.chips,
            round_bet: self.round_bet,
            status: self.status,
            can_raise,
        }
    }
}
