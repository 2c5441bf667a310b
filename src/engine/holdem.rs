//! Правила холдема: блайнды, круги ставок по улицам, шоудаун.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::domain::chips::Chips;
use crate::domain::{Game, OddChipRule, Round, SeatIndex, SeatStatus};
use crate::engine::actions::Action;
use crate::engine::betting::BettingState;
use crate::engine::errors::{EngineError, TableError};
use crate::engine::hand_history::HandEventKind;
use crate::engine::positions::{collect_seats_after, next_seat_where, order_from_button};
use crate::engine::seat::Seat;
use crate::engine::settlement::{payouts, settle};
use crate::engine::states::TableState;
use crate::engine::table::TableCore;

type StepResult = Result<Option<TableState>, EngineError>;

pub(crate) fn step(core: &mut TableCore, state: TableState) -> StepResult {
    match state {
        TableState::Start => start(core),
        TableState::Act => act(core),
        TableState::Street => street(core),
        TableState::Showdown => showdown(core),
        TableState::Bid | TableState::Middle => {
            Err(EngineError::Internal("состояние Тарабиша в холдеме"))
        }
        TableState::End | TableState::Error => Err(EngineError::Internal("терминальное состояние")),
    }
}

/// Новая раздача: кнопка, анте, блайнды, карманные карты.
fn start(core: &mut TableCore) -> StepResult {
    let eligible = core
        .seats
        .iter()
        .filter(|s| s.is_occupied() && !s.chips.is_zero())
        .count();
    if eligible < 2 {
        if core.hands_played == 0 {
            return Ok(core.reject(TableError::NotEnoughPlayers, TableState::Start));
        }
        return Ok(Some(TableState::End));
    }

    core.reset_hand();
    for seat in &mut core.seats {
        seat.status = match (seat.is_occupied(), seat.chips.is_zero()) {
            (true, false) => SeatStatus::Active,
            (true, true) => SeatStatus::Busted,
            (false, _) => SeatStatus::Waiting,
        };
    }

    let from = core.button.unwrap_or(0);
    let button = next_seat_where(&core.seats, from, Seat::is_active)
        .ok_or(EngineError::Internal("нет места для кнопки"))?;
    core.button = Some(button);
    core.round = Round::Preflop;
    core.history.push(HandEventKind::HandStarted {
        hand_no: core.hands_played + 1,
        button,
    });

    let stakes = core.config.stakes;
    if !stakes.ante.is_zero() {
        for seat in core.seats.iter_mut().filter(|s| s.is_active()) {
            let paid = seat.take_dead(stakes.ante);
            core.pot.add(seat.index, paid);
            core.history.push(HandEventKind::AntePosted {
                seat: seat.index,
                amount: paid,
            });
        }
    }

    // Один на один кнопка ставит малый блайнд.
    let small_blind = if core.live_seats().len() == 2 {
        button
    } else {
        next_seat_where(&core.seats, button, Seat::is_live)
            .ok_or(EngineError::Internal("нет места для малого блайнда"))?
    };
    let big_blind = next_seat_where(&core.seats, small_blind, Seat::is_live)
        .ok_or(EngineError::Internal("нет места для большого блайнда"))?;
    post_blind(core, small_blind, stakes.small_bet);
    post_blind(core, big_blind, stakes.big_bet);

    let seats: Vec<SeatIndex> = core.seats.iter().filter(|s| s.is_live()).map(|s| s.index).collect();
    core.dealer.start_hand(Game::Holdem, &seats);

    let current_bet = max_round_bet(core);
    let to_act = collect_seats_after(&core.seats, big_blind, Seat::is_active);
    core.betting = BettingState::new(current_bet, stakes.big_bet, to_act);
    core.betting.bets = 1;

    debug!(button, small_blind, big_blind, pot = %core.pot.total(), "hand started");
    Ok(Some(open_or_close(core)))
}

fn post_blind(core: &mut TableCore, index: SeatIndex, amount: Chips) {
    let Some(seat) = core.seats.get_mut(index as usize) else {
        return;
    };
    let paid = seat.take(amount);
    core.pot.add(index, paid);
    core.history.push(HandEventKind::BlindPosted { seat: index, amount: paid });
}

fn max_round_bet(core: &TableCore) -> Chips {
    core.seats
        .iter()
        .map(|s| s.round_bet)
        .max()
        .unwrap_or(Chips::ZERO)
}

/// Круг ставок закрыт: все высказались, либо ходить осталось одному,
/// которому ничего не нужно уравнивать.
fn betting_closed(core: &TableCore) -> bool {
    if core.betting.is_round_complete() {
        return true;
    }
    let mut active = core.seats.iter().filter(|s| s.is_active());
    match (active.next(), active.next()) {
        (None, _) => true,
        (Some(only), None) => core.resolver().outstanding(only).is_zero(),
        _ => false,
    }
}

/// После любого изменения ставок: чей ход или куда идти дальше.
fn open_or_close(core: &mut TableCore) -> TableState {
    if core.live_seats().len() < 2 {
        core.action = None;
        return TableState::Showdown;
    }
    if betting_closed(core) {
        core.action = None;
        return if core.round == Round::River {
            TableState::Showdown
        } else {
            TableState::Street
        };
    }
    core.action = core.betting.next_to_act();
    if core.action.is_some() {
        TableState::Act
    } else {
        TableState::Street
    }
}

/// Одно действие игрока на ходу.
fn act(core: &mut TableCore) -> StepResult {
    let index = core
        .action
        .ok_or(EngineError::Internal("Act без игрока на ходу"))?;

    let action = match core.request_action(index) {
        Ok(action) => action,
        Err(error) => return Ok(core.fail(error)),
    };

    let (checked, outstanding) = {
        let seat = core
            .seat(index)
            .ok_or(EngineError::Internal("ход на несуществующем месте"))?;
        let resolver = core.resolver();
        (resolver.validate(seat, &action), resolver.outstanding(seat))
    };
    if let Err(error) = checked {
        return Ok(core.reject(error.into(), TableState::Act));
    }

    let paid = match action {
        Action::Fold => {
            set_status(core, index, SeatStatus::Folded);
            core.betting.mark_acted(index);
            Chips::ZERO
        }
        Action::Check => {
            core.betting.mark_acted(index);
            Chips::ZERO
        }
        Action::Call => {
            let paid = pay(core, index, outstanding);
            core.betting.mark_acted(index);
            paid
        }
        Action::Bet(amount) | Action::Raise(amount) => raise(core, index, outstanding + amount),
        Action::Bid(_) => return Err(EngineError::Internal("заявка прошла проверку в холдеме")),
    };

    debug!(seat = index, %action, paid = %paid, pot = %core.pot.total(), "player acted");
    core.history.push(HandEventKind::PlayerActed {
        seat: index,
        action,
        paid,
        pot_after: core.pot.total(),
    });

    Ok(Some(open_or_close(core)))
}

fn set_status(core: &mut TableCore, index: SeatIndex, status: SeatStatus) {
    if let Some(seat) = core.seats.get_mut(index as usize) {
        seat.status = status;
    }
}

fn pay(core: &mut TableCore, index: SeatIndex, amount: Chips) -> Chips {
    let Some(seat) = core.seats.get_mut(index as usize) else {
        return Chips::ZERO;
    };
    let paid = seat.take(amount);
    core.pot.add(index, paid);
    paid
}

/// Bet/raise: довести ставку места до `total` сверх прежнего вклада.
fn raise(core: &mut TableCore, index: SeatIndex, total: Chips) -> Chips {
    let previous_bet = core.betting.current_bet;
    let paid = pay(core, index, total);
    let new_bet = core
        .seat(index)
        .map(|s| s.round_bet)
        .unwrap_or(previous_bet);
    let increment = new_bet.saturating_sub(previous_bet);
    let to_act = collect_seats_after(&core.seats, index, |s| s.is_active() && s.index != index);

    if increment >= core.betting.min_raise {
        core.betting.on_full_raise(index, new_bet, increment, to_act);
    } else {
        core.betting.on_short_raise(index, new_bet, to_act);
    }
    paid
}

/// Следующая улица: обнулить ставки раунда, открыть карты, начать круг.
fn street(core: &mut TableCore) -> StepResult {
    let Some(round) = core.round.next_street() else {
        return Ok(Some(TableState::Showdown));
    };
    core.round = round;
    for seat in &mut core.seats {
        seat.round_bet = Chips::ZERO;
    }
    core.dealer.deal_round(round);
    core.history.push(HandEventKind::RoundChanged { round });

    let button = core.button.unwrap_or(0);
    let to_act = collect_seats_after(&core.seats, button, Seat::is_active);
    core.betting = BettingState::new(Chips::ZERO, core.config.stakes.big_bet, to_act);

    debug!(%round, board = core.dealer.board().len(), "street dealt");
    Ok(Some(open_or_close(core)))
}

/// Расчёт: сайд-поты, силы рук, нечётные фишки, выбывшие.
fn showdown(core: &mut TableCore) -> StepResult {
    // Если до ривера дошли без торговли (все в all-in), докладываем борд.
    let live = core.live_seats();
    if live.len() > 1 {
        while let Some(round) = core.round.next_street() {
            core.round = round;
            core.dealer.deal_round(round);
        }
    }
    core.round = Round::Showdown;
    core.history.push(HandEventKind::RoundChanged { round: Round::Showdown });

    let ranks: BTreeMap<SeatIndex, _> = live
        .iter()
        .map(|seat| (*seat, core.dealer.rank(*seat)))
        .collect();
    let odd_order = match core.config.odd_chip {
        OddChipRule::LeftOfButton => order_from_button(&core.seats, core.button),
        OddChipRule::LowestSeat => core.seats.iter().map(|s| s.index).collect(),
    };

    let results = settle(&core.pot.contributions, &live, &ranks, &odd_order);
    for (index, amount) in payouts(&results) {
        if let Some(seat) = core.seats.get_mut(index as usize) {
            seat.chips += amount;
        }
        core.history.push(HandEventKind::PotAwarded { seat: index, amount });
        debug!(seat = index, amount = %amount, "pot awarded");
    }

    for seat in &mut core.seats {
        seat.round_bet = Chips::ZERO;
        if seat.is_occupied() {
            seat.status = if seat.chips.is_zero() {
                SeatStatus::Busted
            } else {
                SeatStatus::Waiting
            };
        }
    }

    core.hands_played += 1;
    core.history.push(HandEventKind::HandFinished {
        hand_no: core.hands_played,
    });
    info!(hand = core.hands_played, pot = %core.pot.total(), winners = results.len(), "hand finished");

    core.pot.reset();
    core.action = None;
    core.betting = BettingState::default();
    core.results = Some(results);

    let with_chips = core
        .seats
        .iter()
        .filter(|s| s.is_occupied() && !s.chips.is_zero())
        .count();
    Ok(Some(if with_chips >= 2 {
        TableState::Start
    } else {
        TableState::End
    }))
}
