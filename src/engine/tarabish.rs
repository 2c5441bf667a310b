//! Правила Тарабиша: сдача, торговля за козырь, добор перед розыгрышем.

use tracing::{debug, info};

use crate::domain::chips::Chips;
use crate::domain::{Game, HandResult, Results, Round, SeatStatus};
use crate::engine::actions::Action;
use crate::engine::bidding::BiddingOutcome;
use crate::engine::errors::{ActionError, EngineError, TableError};
use crate::engine::hand_history::HandEventKind;
use crate::engine::positions::{next_occupied_seat, next_seat_where, prev_occupied_seat};
use crate::engine::seat::Seat;
use crate::engine::states::TableState;
use crate::engine::table::TableCore;

type StepResult = Result<Option<TableState>, EngineError>;

pub(crate) fn step(core: &mut TableCore, state: TableState) -> StepResult {
    match state {
        TableState::Start => start(core),
        TableState::Bid => bid(core),
        TableState::Middle => middle(core),
        TableState::Act | TableState::Street | TableState::Showdown => {
            Err(EngineError::Internal("состояние холдема в Тарабише"))
        }
        TableState::End | TableState::Error => Err(EngineError::Internal("терминальное состояние")),
    }
}

/// Сдача: новый дилер, по шесть карт, торговлю открывает место слева от дилера.
fn start(core: &mut TableCore) -> StepResult {
    let seats = core.occupied();
    if seats.len() < 2 {
        if core.hands_played == 0 {
            return Ok(core.reject(TableError::NotEnoughPlayers, TableState::Start));
        }
        return Ok(Some(TableState::End));
    }

    core.reset_hand();
    for seat in core.seats.iter_mut().filter(|s| s.is_occupied()) {
        seat.status = SeatStatus::Active;
    }

    // Первая сдача – последнее занятое место, дальше по кругу.
    let dealer = match core.button {
        None => prev_occupied_seat(&core.seats, 0),
        Some(current) => next_occupied_seat(&core.seats, current),
    }
    .ok_or(EngineError::Internal("нет места для дилера"))?;
    core.button = Some(dealer);
    core.round = Round::Bidding;
    core.dealer.start_hand(Game::Tarabish, &seats);
    core.action = next_seat_where(&core.seats, dealer, Seat::is_active);

    core.history.push(HandEventKind::HandStarted {
        hand_no: core.hands_played + 1,
        button: dealer,
    });
    core.history.push(HandEventKind::RoundChanged {
        round: Round::Bidding,
    });
    debug!(dealer, first = ?core.action, "tarabish hand dealt");
    Ok(Some(TableState::Bid))
}

/// Одна заявка.
fn bid(core: &mut TableCore) -> StepResult {
    let index = core
        .action
        .ok_or(EngineError::Internal("Bid без игрока на ходу"))?;
    let dealer = core
        .button
        .ok_or(EngineError::Internal("Bid без дилера"))?;

    let action = match core.request_action(index) {
        Ok(action) => action,
        Err(error) => return Ok(core.fail(error)),
    };
    let Action::Bid(bid) = action else {
        let error = ActionError::NotAvailable(action.kind());
        return Ok(core.reject(error.into(), TableState::Bid));
    };
    if let Err(error) = core.bids.validate(core.config.bidding, index, dealer, bid) {
        return Ok(core.reject(error.into(), TableState::Bid));
    }

    core.bids.push(index, bid);
    core.history.push(HandEventKind::BidPlaced { seat: index, bid });
    debug!(seat = index, %bid, "bid placed");

    // Севшие во время торговли ждут следующей сдачи.
    let participants = core.active_count();
    match core.bids.outcome(core.config.bidding, participants) {
        BiddingOutcome::Open => {
            core.action = next_seat_where(&core.seats, index, Seat::is_active);
            Ok(Some(TableState::Bid))
        }
        BiddingOutcome::Closed { maker, trump } => {
            core.maker = Some(maker);
            core.trump = Some(trump);
            core.action = None;
            core.history.push(HandEventKind::TrumpMade { seat: maker, trump });
            info!(maker, %trump, "trump made");
            Ok(Some(TableState::Middle))
        }
        BiddingOutcome::Redeal => {
            core.action = None;
            info!(dealer, "everyone passed, redeal");
            Ok(Some(TableState::Start))
        }
    }
}

/// Подготовка розыгрыша: добор по три карты, первый ход слева от дилера.
fn middle(core: &mut TableCore) -> StepResult {
    core.round = Round::Play;
    core.dealer.deal_round(Round::Play);
    core.history.push(HandEventKind::RoundChanged { round: Round::Play });
    core.action = core
        .button
        .and_then(|dealer| next_seat_where(&core.seats, dealer, Seat::is_active));
    debug!(lead = ?core.action, "play set up");
    Ok(Some(TableState::End))
}

/// Результат раздачи Тарабиша: кто и какой козырь назвал.
pub(crate) fn publish_results(core: &mut TableCore) {
    let (Some(maker), Some(trump)) = (core.maker, core.trump) else {
        return;
    };
    let mut results = Results::new();
    results.insert(
        maker,
        vec![HandResult {
            seat: maker,
            amount: Chips::ZERO,
            description: format!("called {} trump", trump.name()),
        }],
    );
    core.hands_played += 1;
    core.history.push(HandEventKind::HandFinished {
        hand_no: core.hands_played,
    });
    core.results = Some(results);
}
