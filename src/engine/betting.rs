use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{Limit, SeatIndex, FIXED_LIMIT_BET_CAP};

/// Состояние раунда ставок (одной улицы).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Максимальная ставка раунда, до которой должны дотянуться остальные.
    pub current_bet: Chips,
    /// Последнее полное повышение – минимальный размер следующего.
    pub min_raise: Chips,
    /// Очередь ходящих по кругу, кто ещё должен высказаться.
    pub to_act: Vec<SeatIndex>,
    /// Кто уже действовал после последнего полного повышения.
    /// Неполный all-in рейз торговлю для них не открывает.
    pub acted: Vec<SeatIndex>,
    /// Сколько ставок (бет + рейзы) было в раунде.
    pub bets: u8,
}

impl BettingState {
    pub fn new(current_bet: Chips, min_raise: Chips, to_act: Vec<SeatIndex>) -> Self {
        Self {
            current_bet,
            min_raise,
            to_act,
            acted: Vec::new(),
            bets: 0,
        }
    }

    /// Следующий, кто должен ходить.
    pub fn next_to_act(&self) -> Option<SeatIndex> {
        self.to_act.first().copied()
    }

    /// Место высказалось без повышения (check/call/fold).
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
        if !self.acted.contains(&seat) {
            self.acted.push(seat);
        }
    }

    /// Полное повышение: открывает торговлю всем остальным.
    pub fn on_full_raise(
        &mut self,
        seat: SeatIndex,
        new_bet: Chips,
        increment: Chips,
        to_act: Vec<SeatIndex>,
    ) {
        self.current_bet = new_bet;
        self.min_raise = increment;
        self.to_act = to_act;
        self.acted = vec![seat];
        self.bets = self.bets.saturating_add(1);
    }

    /// Неполный all-in рейз: остальные должны ответить, но перерейзить
    /// могут только те, кто ещё не действовал после полного повышения.
    pub fn on_short_raise(&mut self, seat: SeatIndex, new_bet: Chips, to_act: Vec<SeatIndex>) {
        self.current_bet = new_bet;
        self.to_act = to_act;
        if !self.acted.contains(&seat) {
            self.acted.push(seat);
        }
    }

    /// Может ли место ещё повышать в этом раунде (без учёта стека).
    pub fn is_open_for(&self, seat: SeatIndex) -> bool {
        !self.acted.contains(&seat)
    }

    /// Достигнут ли лимит ставок (только фикс-лимит).
    pub fn is_capped(&self, limit: Limit) -> bool {
        limit == Limit::FixedLimit && self.bets >= FIXED_LIMIT_BET_CAP
    }

    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }
}
