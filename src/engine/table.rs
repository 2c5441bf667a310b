use tracing::{debug, warn};

use crate::domain::chips::Chips;
use crate::domain::{
    Config, ConfigError, Game, Parameters, Results, Round, SeatIndex, SeatStatus, SeatView, Suit,
};
use crate::engine::actions::{Action, ActionKind};
use crate::engine::betting::BettingState;
use crate::engine::bidding::BidHistory;
use crate::engine::dealer::Dealer;
use crate::engine::errors::{EngineError, SeatingError, TableError};
use crate::engine::hand_history::HandHistory;
use crate::engine::player::{Player, Turn};
use crate::engine::pot::Pot;
use crate::engine::seat::Seat;
use crate::engine::states::TableState;
use crate::engine::validation::Resolver;
use crate::engine::{holdem, tarabish};
use crate::statemachine::{Executor, StateExecutor, StateMachine, StepOutcome};

/// Итог одного шага стола.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    /// Результаты раздачи – только на шаге, который её рассчитал.
    pub results: Option<Results>,
    /// Стол закончил работу.
    pub done: bool,
}

/// Незавершённая раздача из снэпшота.
pub(crate) struct SavedHand {
    pub pot: Pot,
    pub round: Round,
    pub action: Option<SeatIndex>,
    pub betting: BettingState,
    pub bids: BidHistory,
    pub trump: Option<Suit>,
    pub maker: Option<SeatIndex>,
    /// Состояние автомата на момент снимка.
    pub resume: Option<TableState>,
}

/// Состояние стола, которое крутит исполнитель.
///
/// Функции вариантов (`holdem`, `tarabish`) работают прямо с этими полями.
pub struct TableCore {
    pub(crate) config: Config,
    pub(crate) seats: Vec<Seat>,
    pub(crate) pot: Pot,
    pub(crate) round: Round,
    pub(crate) button: Option<SeatIndex>,
    pub(crate) action: Option<SeatIndex>,
    pub(crate) betting: BettingState,
    pub(crate) bids: BidHistory,
    pub(crate) trump: Option<Suit>,
    pub(crate) maker: Option<SeatIndex>,
    pub(crate) dealer: Box<dyn Dealer>,
    pub(crate) history: HandHistory,
    pub(crate) hands_played: u32,
    /// Результаты, которые `next()` ещё не отдал.
    pub(crate) results: Option<Results>,
    /// Нефатальный отказ текущего шага (состояние не менялось).
    pub(crate) rejected: Option<TableError>,
    /// Фатальная ошибка, которую отдаст состояние `Error`.
    pub(crate) fault: Option<EngineError>,
}

impl TableCore {
    pub(crate) fn resolver(&self) -> Resolver<'_> {
        Resolver {
            limit: self.config.limit,
            stakes: &self.config.stakes,
            round: self.round,
            betting: &self.betting,
            pot_total: self.pot.total(),
        }
    }

    pub(crate) fn seat(&self, index: SeatIndex) -> Option<&Seat> {
        self.seats.get(index as usize)
    }

    pub(crate) fn occupied(&self) -> Vec<SeatIndex> {
        self.seats
            .iter()
            .filter(|s| s.is_occupied())
            .map(|s| s.index)
            .collect()
    }

    pub(crate) fn live_seats(&self) -> Vec<SeatIndex> {
        self.seats
            .iter()
            .filter(|s| s.is_live())
            .map(|s| s.index)
            .collect()
    }

    pub(crate) fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_active()).count()
    }

    pub(crate) fn can_raise(&self, seat: &Seat) -> bool {
        match self.config.game {
            Game::Holdem => self.resolver().can_raise(seat),
            Game::Tarabish => false,
        }
    }

    pub(crate) fn valid_actions(&self, seat: &Seat) -> Vec<ActionKind> {
        if self.action != Some(seat.index) {
            return Vec::new();
        }
        match self.config.game {
            Game::Holdem => self.resolver().valid_actions(seat),
            Game::Tarabish if self.round == Round::Bidding => vec![ActionKind::Bid],
            Game::Tarabish => Vec::new(),
        }
    }

    /// Что показать игроку на месте `index`.
    pub(crate) fn turn_for(&self, index: SeatIndex) -> Option<Turn> {
        let seat = self.seat(index)?;
        let (outstanding, (min_raise, max_raise)) = match self.config.game {
            Game::Holdem => {
                let resolver = self.resolver();
                (resolver.outstanding(seat), resolver.raise_bounds(seat))
            }
            Game::Tarabish => (Chips::ZERO, (Chips::ZERO, Chips::ZERO)),
        };
        Some(Turn {
            seat: index,
            round: self.round,
            chips: seat.chips,
            outstanding,
            min_raise,
            max_raise,
            valid_actions: self.valid_actions(seat),
        })
    }

    /// Спросить игрока на месте `index`.
    /// Ошибка игрока превращается в фатальную ошибку движка.
    pub(crate) fn request_action(
        &mut self,
        index: SeatIndex,
    ) -> Result<Action, EngineError> {
        let turn = self
            .turn_for(index)
            .ok_or(EngineError::Internal("ход на несуществующем месте"))?;
        let player = self
            .seats
            .get_mut(index as usize)
            .and_then(|s| s.player.as_mut())
            .ok_or(EngineError::Internal("ход на пустом месте"))?;
        player
            .action(&turn)
            .map_err(|source| EngineError::Player { seat: index, source })
    }

    /// Отказ без смены состояния: тот же шаг выполнится на следующем `next()`.
    pub(crate) fn reject(&mut self, error: TableError, state: TableState) -> Option<TableState> {
        warn!(?state, %error, "action rejected");
        self.rejected = Some(error);
        Some(state)
    }

    /// Перевести автомат в `Error`: ошибку отдаст следующий шаг.
    pub(crate) fn fail(&mut self, error: EngineError) -> Option<TableState> {
        warn!(%error, "table failed");
        self.action = None;
        self.fault = Some(error);
        Some(TableState::Error)
    }

    /// Сбросить всё, что живёт одну раздачу.
    pub(crate) fn reset_hand(&mut self) {
        self.pot.reset();
        self.betting = BettingState::default();
        self.bids.clear();
        self.trump = None;
        self.maker = None;
        self.action = None;
        self.round = Round::Waiting;
        self.history.clear();
        for seat in &mut self.seats {
            seat.round_bet = Chips::ZERO;
        }
    }

    /// Вернуть местам их вклады в банк (раздача не будет доиграна).
    fn refund_pot(&mut self) {
        if self.pot.total().is_zero() {
            return;
        }
        for seat in self.seats.iter_mut().filter(|s| s.is_occupied()) {
            seat.chips += self.pot.contribution(seat.index);
            seat.round_bet = Chips::ZERO;
        }
        warn!(pot = %self.pot.total(), "unfinished hand refunded");
        self.pot.reset();
    }

    /// Колода в снэпшот не попадает: раздать карты текущей раздачи заново
    /// тем же местам и открыть столько, сколько уже открыто.
    fn redeal(&mut self) {
        let dealt: Vec<SeatIndex> = self
            .seats
            .iter()
            .filter(|s| {
                s.is_occupied()
                    && matches!(
                        s.status,
                        SeatStatus::Active | SeatStatus::Folded | SeatStatus::AllIn
                    )
            })
            .map(|s| s.index)
            .collect();
        let game = self.config.game;
        match (game, self.round) {
            (
                Game::Holdem,
                Round::Preflop | Round::Flop | Round::Turn | Round::River | Round::Showdown,
            ) => {
                self.dealer.start_hand(game, &dealt);
                let mut street = Round::Preflop;
                while let Some(next) = street.next_street() {
                    if next > self.round {
                        break;
                    }
                    self.dealer.deal_round(next);
                    street = next;
                }
            }
            (Game::Tarabish, Round::Bidding | Round::Play) => {
                self.dealer.start_hand(game, &dealt);
                if self.round == Round::Play {
                    self.dealer.deal_round(Round::Play);
                }
            }
            _ => {}
        }
    }

    fn end(&mut self) -> Option<TableState> {
        if self.config.game == Game::Tarabish {
            tarabish::publish_results(self);
        }
        self.round = Round::Complete;
        self.action = None;
        debug!(hands = self.hands_played, "table complete");
        None
    }
}

impl StateMachine for TableCore {
    type State = TableState;
    type Error = EngineError;

    fn step(&mut self, state: TableState) -> Result<Option<TableState>, EngineError> {
        match state {
            TableState::End => Ok(self.end()),
            TableState::Error => Err(self
                .fault
                .take()
                .unwrap_or(EngineError::Internal("состояние Error без ошибки"))),
            _ => match self.config.game {
                Game::Holdem => holdem::step(self, state),
                Game::Tarabish => tarabish::step(self, state),
            },
        }
    }
}

/// Стол: места, банк, фазы раздачи и встроенный автомат.
///
/// Внешний код сажает игроков через `sit` и дальше только зовёт `next()`,
/// который выполняет ровно одно состояние автомата.
pub struct PokerTable {
    core: TableCore,
    executor: StateExecutor<TableCore>,
}

impl PokerTable {
    pub fn new(config: Config, dealer: Box<dyn Dealer>) -> Result<Self, ConfigError> {
        config.validate()?;
        let seats = (0..config.num_of_seats).map(Seat::empty).collect();
        let name = format!("{:?}", config.game);
        Ok(Self {
            core: TableCore {
                config,
                seats,
                pot: Pot::new(),
                round: Round::Waiting,
                button: None,
                action: None,
                betting: BettingState::default(),
                bids: BidHistory::new(),
                trump: None,
                maker: None,
                dealer,
                history: HandHistory::new(),
                hands_played: 0,
                results: None,
                rejected: None,
                fault: None,
            },
            executor: StateExecutor::new(name, TableState::Start),
        })
    }

    /// Посадить игрока. Проверки по порядку: уже сидит, нет такого места, место занято.
    pub fn sit(&mut self, player: Box<dyn Player>, params: Parameters) -> Result<(), SeatingError> {
        if self
            .core
            .seats
            .iter()
            .any(|s| s.player_id() == Some(player.id()))
        {
            return Err(SeatingError::AlreadySeated);
        }
        let seat = self
            .core
            .seats
            .get_mut(params.seat as usize)
            .ok_or(SeatingError::InvalidSeat)?;
        if seat.is_occupied() {
            return Err(SeatingError::SeatOccupied);
        }

        debug!(seat = params.seat, player = player.id(), chips = %params.chips, "player seated");
        seat.player = Some(player);
        seat.chips = params.chips;
        seat.round_bet = Chips::ZERO;
        seat.status = SeatStatus::Waiting;
        Ok(())
    }

    /// Выполнить одно состояние автомата.
    pub fn next(&mut self) -> Result<Progress, TableError> {
        // Трасса хранит только текущую раздачу.
        if self.executor.current() == Some(TableState::Start)
            && self.executor.nodes().last() == Some(&TableState::Showdown)
        {
            self.executor.clear_nodes();
        }
        let outcome = self.executor.step(&mut self.core)?;
        if let Some(rejected) = self.core.rejected.take() {
            return Err(rejected);
        }
        Ok(Progress {
            results: self.core.results.take(),
            done: outcome == StepOutcome::Finished,
        })
    }

    /// Включить/выключить лог исполнителя.
    pub fn set_logging(&mut self, enabled: bool) {
        self.executor.log(enabled);
    }

    /// Направить лог исполнителя в свою функцию (и включить его).
    pub fn with_log_facility(mut self, facility: impl FnMut(&str) + 'static) -> Self {
        self.executor.set_log_facility(facility);
        self.executor.log(true);
        self
    }

    pub fn config(&self) -> &Config {
        &self.core.config
    }

    pub fn num_of_seats(&self) -> u8 {
        self.core.config.num_of_seats
    }

    pub fn round(&self) -> Round {
        self.core.round
    }

    /// Чей ход (None – никто не должен ходить).
    pub fn action(&self) -> Option<SeatIndex> {
        self.core.action
    }

    pub fn button(&self) -> Option<SeatIndex> {
        self.core.button
    }

    pub fn trump(&self) -> Option<Suit> {
        self.core.trump
    }

    /// Место, назвавшее козырь.
    pub fn maker(&self) -> Option<SeatIndex> {
        self.core.maker
    }

    pub fn pot(&self) -> &Pot {
        &self.core.pot
    }

    pub fn history(&self) -> &HandHistory {
        &self.core.history
    }

    pub fn bids(&self) -> &BidHistory {
        &self.core.bids
    }

    pub fn dealer(&self) -> &dyn Dealer {
        self.core.dealer.as_ref()
    }

    pub fn hands_played(&self) -> u32 {
        self.core.hands_played
    }

    /// Трасса выполненных состояний.
    pub fn nodes(&self) -> &[TableState] {
        self.executor.nodes()
    }

    pub fn node_names(&self) -> Vec<&'static str> {
        self.executor.node_names()
    }

    pub fn is_done(&self) -> bool {
        self.executor.is_finished()
    }

    pub fn is_halted(&self) -> bool {
        self.executor.is_halted()
    }

    pub fn seat(&self, index: SeatIndex) -> Option<SeatView> {
        let seat = self.core.seat(index)?;
        Some(seat.view(self.core.can_raise(seat)))
    }

    /// Занятые места в порядке номеров.
    pub fn players(&self) -> Vec<SeatView> {
        self.core
            .seats
            .iter()
            .filter(|s| s.is_occupied())
            .map(|s| s.view(self.core.can_raise(s)))
            .collect()
    }

    /// Все места, включая пустые.
    pub fn seats(&self) -> Vec<SeatView> {
        self.core
            .seats
            .iter()
            .map(|s| s.view(self.core.can_raise(s)))
            .collect()
    }

    pub fn current_player(&self) -> Option<SeatView> {
        self.core.action.and_then(|i| self.seat(i))
    }

    pub fn valid_actions(&self) -> Vec<ActionKind> {
        self.core
            .action
            .and_then(|i| self.core.seat(i))
            .map(|s| self.core.valid_actions(s))
            .unwrap_or_default()
    }

    /// Сколько месту на ходу нужно добавить до колла.
    pub fn outstanding(&self) -> Chips {
        self.turn().map(|t| t.outstanding).unwrap_or(Chips::ZERO)
    }

    pub fn min_raise(&self) -> Chips {
        self.turn().map(|t| t.min_raise).unwrap_or(Chips::ZERO)
    }

    pub fn max_raise(&self) -> Chips {
        self.turn().map(|t| t.max_raise).unwrap_or(Chips::ZERO)
    }

    /// Текущий ход целиком (то, что видит игрок на месте `action`).
    pub fn turn(&self) -> Option<Turn> {
        self.core.action.and_then(|i| self.core.turn_for(i))
    }

    pub(crate) fn core(&self) -> &TableCore {
        &self.core
    }

    /// Какое состояние выполнит следующий `next()` (None – стол закончил или упал).
    pub fn next_state(&self) -> Option<TableState> {
        self.executor.current()
    }

    /// Собрать стол заново из сохранённых частей (см. `infra::persistence`).
    pub(crate) fn restore(
        config: Config,
        dealer: Box<dyn Dealer>,
        seats: Vec<Seat>,
        button: Option<SeatIndex>,
        hands_played: u32,
        hand: SavedHand,
    ) -> Result<Self, ConfigError> {
        let mut table = Self::new(config, dealer)?;
        let core = &mut table.core;
        core.seats = seats;
        core.button = button;
        core.hands_played = hands_played;
        core.pot = hand.pot;
        core.round = hand.round;
        core.action = hand.action;
        core.betting = hand.betting;
        core.bids = hand.bids;
        core.trump = hand.trump;
        core.maker = hand.maker;

        let resume = match hand.resume {
            Some(state) if state != TableState::Error => state,
            _ => match (hand.action, core.config.game) {
                (Some(_), Game::Holdem) => TableState::Act,
                (Some(_), Game::Tarabish) => TableState::Bid,
                (None, _) => TableState::Start,
            },
        };
        if resume == TableState::Start {
            core.refund_pot();
        } else {
            core.redeal();
        }

        debug!(?resume, round = %core.round, action = ?core.action, "hand resumed");
        let name = format!("{:?}", core.config.game);
        table.executor = StateExecutor::new(name, resume);
        Ok(table)
    }
}
