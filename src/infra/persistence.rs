use std::collections::{BTreeSet, HashMap};

use thiserror::Error;
use tracing::debug;

use crate::domain::ConfigError;
use crate::engine::dealer::Dealer;
use crate::engine::errors::SeatingError;
use crate::engine::player::PlayerError;
use crate::engine::seat::Seat;
use crate::engine::table::{PokerTable, SavedHand};
use crate::infra::registry::PlayerRegistry;
use crate::state::TableSnapshot;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Ошибка JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Не знаю, как восстановить игрока {0}")]
    UnknownPlayer(String),

    #[error("Игрок не восстановился: {0}")]
    Player(#[from] PlayerError),

    #[error("Некорректный конфиг в снэпшоте: {0}")]
    Config(#[from] ConfigError),

    #[error("Некорректная рассадка в снэпшоте: {0}")]
    Seating(#[from] SeatingError),

    #[error("В снэпшоте {found} мест, а конфиг говорит {expected}")]
    SeatLayout { expected: u8, found: usize },
}

/// Стол → JSON.
pub fn encode_table(table: &PokerTable) -> Result<String, PersistError> {
    let snapshot = TableSnapshot::from_table(table);
    Ok(serde_json::to_string(&snapshot)?)
}

/// JSON → стол. Игроки создаются через `registry`.
///
/// Незавершённая раздача продолжается с того же хода. Если снимок сделан
/// после ошибки и хода нет, вклады в банк возвращаются местам.
pub fn decode_table(
    json: &str,
    registry: &PlayerRegistry,
    dealer: Box<dyn Dealer>,
) -> Result<PokerTable, PersistError> {
    let snapshot: TableSnapshot = serde_json::from_str(json)?;
    restore_table(snapshot, registry, dealer)
}

pub fn restore_table(
    snapshot: TableSnapshot,
    registry: &PlayerRegistry,
    dealer: Box<dyn Dealer>,
) -> Result<PokerTable, PersistError> {
    let expected = snapshot.config.num_of_seats;
    let in_order = snapshot
        .seats
        .iter()
        .enumerate()
        .all(|(i, s)| s.seat as usize == i);
    if snapshot.seats.len() != expected as usize || !in_order {
        return Err(PersistError::SeatLayout {
            expected,
            found: snapshot.seats.len(),
        });
    }

    let mut seen = BTreeSet::new();
    let mut seats = Vec::with_capacity(snapshot.seats.len());
    for saved in &snapshot.seats {
        let mut seat = Seat::empty(saved.seat);
        if let Some(id) = &saved.player {
            if !seen.insert(id.clone()) {
                return Err(SeatingError::AlreadySeated.into());
            }
            seat.player = Some(registry.restore(id)?);
            seat.chips = saved.chips;
            seat.round_bet = saved.round_bet;
            seat.status = saved.status;
        }
        seats.push(seat);
    }

    debug!(seats = seats.len(), players = seen.len(), round = %snapshot.round, "table restored");
    let hand = SavedHand {
        pot: snapshot.pot,
        round: snapshot.round,
        action: snapshot.action,
        betting: snapshot.betting,
        bids: snapshot.bids,
        trump: snapshot.trump,
        maker: snapshot.maker,
        resume: snapshot.resume,
    };
    Ok(PokerTable::restore(
        snapshot.config,
        dealer,
        seats,
        snapshot.button,
        snapshot.hands_played,
        hand,
    )?)
}

/// Простое in-memory хранилище столов (в виде JSON) для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryTableStore {
    tables: HashMap<String, String>,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, name: impl Into<String>, table: &PokerTable) -> Result<(), PersistError> {
        let json = encode_table(table)?;
        self.tables.insert(name.into(), json);
        Ok(())
    }

    /// Загрузить стол; `None`, если под этим именем ничего нет.
    pub fn load(
        &self,
        name: &str,
        registry: &PlayerRegistry,
        dealer: Box<dyn Dealer>,
    ) -> Result<Option<PokerTable>, PersistError> {
        self.tables
            .get(name)
            .map(|json| decode_table(json, registry, dealer))
            .transpose()
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.tables.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
