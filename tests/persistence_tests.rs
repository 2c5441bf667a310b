//! Снэпшоты стола: JSON туда и обратно, реестр игроков, хранилище.

use card_table::domain::{Chips, Config, Game, Limit, Parameters, Round, Stakes, Suit};
use card_table::engine::{
    Action, Bid, CardDealer, Player, PlayerError, PokerTable, TableState, Turn,
};
use card_table::infra::persistence::restore_table;
use card_table::infra::{
    action_queue, decode_table, encode_table, DeterministicRng, InMemoryTableStore, PersistError,
    PlayerRegistry, ScriptedPlayer,
};
use card_table::state::TableSnapshot;

/// Бот, который всегда сбрасывает.
struct FoldBot {
    id: String,
}

impl Player for FoldBot {
    fn id(&self) -> &str {
        &self.id
    }

    fn action(&mut self, _turn: &Turn) -> Result<Action, PlayerError> {
        Ok(Action::Fold)
    }

    fn from_id(id: &str) -> Result<Self, PlayerError> {
        Ok(Self { id: id.to_string() })
    }
}

/// Утилита: свежий дилер.
fn dealer() -> Box<CardDealer<DeterministicRng>> {
    Box::new(CardDealer::new(DeterministicRng::from_u64(5)))
}

/// Утилита: конфиг стола заданной игры.
fn config(game: Game, seats: u8) -> Config {
    Config {
        game,
        limit: Limit::NoLimit,
        stakes: Stakes::new(Chips(1), Chips(2), Chips::ZERO),
        num_of_seats: seats,
        ..Config::default()
    }
}

/// Утилита: реестр, который восстанавливает всех как `ScriptedPlayer`.
fn scripted_registry() -> PlayerRegistry {
    let mut registry = PlayerRegistry::new();
    registry.register::<ScriptedPlayer>();
    registry
}

#[test]
fn round_trip_keeps_seats_and_chips() {
    let mut table = PokerTable::new(config(Game::Tarabish, 4), dealer()).unwrap();
    table
        .sit(Box::new(FoldBot::from_id("1").unwrap()), Parameters::new(0, Chips(100)))
        .unwrap();

    let json = encode_table(&table).expect("encode");
    let decoded = decode_table(&json, &scripted_registry(), dealer()).expect("decode");

    let players = decoded.players();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].player_id(), Some("1"));
    assert_eq!(players[0].chips(), Chips(100));
    assert_eq!(decoded.num_of_seats(), 4);
    assert_eq!(decoded.config(), table.config());

    let again = encode_table(&decoded).expect("encode again");
    assert_eq!(json, again, "encode → decode → encode стабилен");
}

#[test]
fn unknown_player_fails_decode() {
    let mut table = PokerTable::new(config(Game::Holdem, 2), dealer()).unwrap();
    table
        .sit(Box::new(FoldBot::from_id("ghost").unwrap()), Parameters::new(1, Chips(10)))
        .unwrap();
    let json = encode_table(&table).unwrap();

    let err = decode_table(&json, &PlayerRegistry::new(), dealer())
        .err()
        .expect("пустой реестр");
    assert!(matches!(err, PersistError::UnknownPlayer(id) if id == "ghost"));
}

#[test]
fn per_id_factory_wins_over_fallback() {
    let mut table = PokerTable::new(config(Game::Holdem, 2), dealer()).unwrap();
    table
        .sit(Box::new(FoldBot::from_id("human").unwrap()), Parameters::new(0, Chips(50)))
        .unwrap();
    table
        .sit(Box::new(FoldBot::from_id("bot").unwrap()), Parameters::new(1, Chips(50)))
        .unwrap();
    let json = encode_table(&table).unwrap();

    let mut registry = scripted_registry();
    registry.register_id("bot", |id: &str| {
        FoldBot::from_id(id).map(|p| Box::new(p) as Box<dyn Player>)
    });
    let mut restored = decode_table(&json, &registry, dealer()).unwrap();

    // "bot" на кнопке ходит первым и сбрасывает сам.
    restored.next().expect("Start");
    assert_eq!(restored.action(), Some(1));
    restored.next().expect("bot сбрасывает");
    let results = restored.next().unwrap().results.expect("расчёт");
    assert_eq!(results[&0][0].amount, Chips(3));

    // "human" восстановлен без ходов: следующий его ход уводит стол в Error.
    restored.next().expect("новая раздача");
    assert_eq!(restored.action(), Some(0));
    assert!(restored.next().is_ok());
    assert_eq!(restored.nodes().last(), Some(&TableState::Act));
    assert!(restored.next().is_err());
    assert!(restored.is_halted());
}

/// Утилита: холдем один на один после блайндов (кнопка 1 на ходу).
fn heads_up_after_blinds() -> PokerTable {
    let mut table = PokerTable::new(config(Game::Holdem, 2), dealer()).unwrap();
    let (_f0, q0) = action_queue(4);
    let (_f1, q1) = action_queue(4);
    table
        .sit(Box::new(ScriptedPlayer::new("a", q0)), Parameters::new(0, Chips(100)))
        .unwrap();
    table
        .sit(Box::new(ScriptedPlayer::new("b", q1)), Parameters::new(1, Chips(100)))
        .unwrap();
    table.next().unwrap();
    assert_eq!(table.pot().total(), Chips(3));
    table
}

//
// ====================== НЕЗАВЕРШЁННАЯ РАЗДАЧА ======================
//

#[test]
fn mid_hand_snapshot_round_trips() {
    let table = heads_up_after_blinds();
    let json = encode_table(&table).unwrap();
    let snapshot: TableSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot.round, Round::Preflop);
    assert_eq!(snapshot.resume, Some(TableState::Act));
    assert_eq!(snapshot.occupied(), 2);

    let mut registry = scripted_registry();
    registry.register_id("b", |id: &str| {
        FoldBot::from_id(id).map(|p| Box::new(p) as Box<dyn Player>)
    });
    let mut restored = decode_table(&json, &registry, dealer()).unwrap();
    let again = encode_table(&restored).unwrap();
    assert_eq!(json, again, "раздача сохраняется как есть");

    assert_eq!(restored.seat(0).unwrap().chips, Chips(98));
    assert_eq!(restored.seat(1).unwrap().chips, Chips(99));
    assert_eq!(restored.seat(1).unwrap().round_bet, Chips(1));
    assert_eq!(restored.pot().total(), Chips(3));
    assert_eq!(restored.round(), Round::Preflop);
    assert_eq!(restored.button(), Some(1));
    assert_eq!(restored.action(), Some(1));
    assert_eq!(restored.outstanding(), Chips(1));
    assert_eq!(restored.dealer().hand(0).len(), 2, "карты розданы заново");
    assert!(restored.nodes().is_empty());

    // Продолжаем с того же хода: "b" сбрасывает, банк уходит месту 0.
    restored.next().expect("b сбрасывает");
    assert_eq!(restored.nodes(), &[TableState::Act]);
    let results = restored.next().unwrap().results.expect("расчёт");
    assert_eq!(results[&0][0].amount, Chips(3));
    assert_eq!(restored.seat(0).unwrap().chips, Chips(101));
}

#[test]
fn stale_hand_without_next_state_refunds_pot() {
    let table = heads_up_after_blinds();
    let mut snapshot = TableSnapshot::from_table(&table);
    snapshot.resume = None;
    snapshot.action = None;

    let mut restored = restore_table(snapshot, &scripted_registry(), dealer()).unwrap();
    assert_eq!(restored.seat(0).unwrap().chips, Chips(100));
    assert_eq!(restored.seat(1).unwrap().chips, Chips(100));
    assert_eq!(restored.pot().total(), Chips::ZERO);
    assert_eq!(restored.next_state(), Some(TableState::Start));

    restored.next().expect("новая раздача");
    assert_eq!(restored.button(), Some(0), "кнопка идёт дальше по кругу");
}

/// Бот Тарабиша: всегда называет черви.
struct HeartsBot {
    id: String,
}

impl Player for HeartsBot {
    fn id(&self) -> &str {
        &self.id
    }

    fn action(&mut self, _turn: &Turn) -> Result<Action, PlayerError> {
        Ok(Action::Bid(Bid::Call(Suit::Hearts)))
    }

    fn from_id(id: &str) -> Result<Self, PlayerError> {
        Ok(Self { id: id.to_string() })
    }
}

#[test]
fn bidding_resumes_after_restore() {
    let mut table = PokerTable::new(config(Game::Tarabish, 2), dealer()).unwrap();
    let (feed, q0) = action_queue(4);
    let (_f1, q1) = action_queue(4);
    table
        .sit(Box::new(ScriptedPlayer::new("1", q0)), Parameters::new(0, Chips::ZERO))
        .unwrap();
    table
        .sit(Box::new(ScriptedPlayer::new("2", q1)), Parameters::new(1, Chips::ZERO))
        .unwrap();
    feed.bid(Bid::Pass).unwrap();
    table.next().unwrap();
    table.next().unwrap();
    assert_eq!(table.action(), Some(1));

    let json = encode_table(&table).unwrap();
    let mut registry = scripted_registry();
    registry.register_id("2", |id: &str| {
        HeartsBot::from_id(id).map(|p| Box::new(p) as Box<dyn Player>)
    });
    let mut restored = decode_table(&json, &registry, dealer()).unwrap();
    assert_eq!(encode_table(&restored).unwrap(), json);
    assert_eq!(restored.next_state(), Some(TableState::Bid));
    assert_eq!(restored.bids().len(), 1);
    assert_eq!(restored.dealer().hand(1).len(), 6);

    restored.next().expect("дилер называет козырь");
    assert_eq!(restored.maker(), Some(1));
    assert_eq!(restored.trump(), Some(Suit::Hearts));
    restored.next().expect("Middle");
    assert_eq!(restored.dealer().hand(1).len(), 9);
}

#[test]
fn broken_seat_layout_is_rejected() {
    let mut table = PokerTable::new(config(Game::Holdem, 3), dealer()).unwrap();
    table
        .sit(Box::new(FoldBot::from_id("x").unwrap()), Parameters::new(0, Chips(10)))
        .unwrap();

    let mut snapshot = TableSnapshot::from_table(&table);
    snapshot.seats.pop();
    let err = restore_table(snapshot, &scripted_registry(), dealer())
        .err()
        .expect("мест меньше, чем в конфиге");
    assert!(matches!(err, PersistError::SeatLayout { expected: 3, found: 2 }));

    let mut snapshot = TableSnapshot::from_table(&table);
    snapshot.seats[2].player = Some("x".to_string());
    let err = restore_table(snapshot, &scripted_registry(), dealer())
        .err()
        .expect("один игрок на двух местах");
    assert!(matches!(err, PersistError::Seating(_)));
}

#[test]
fn garbage_json_is_an_error() {
    let err = decode_table("{not json", &scripted_registry(), dealer())
        .err()
        .expect("это не JSON");
    assert!(matches!(err, PersistError::Json(_)));
}

#[test]
fn store_saves_and_loads_by_name() {
    let mut store = InMemoryTableStore::new();
    assert!(store.is_empty());

    let mut table = PokerTable::new(config(Game::Tarabish, 2), dealer()).unwrap();
    table
        .sit(Box::new(FoldBot::from_id("1").unwrap()), Parameters::new(1, Chips::ZERO))
        .unwrap();
    store.save("t1", &table).unwrap();
    assert_eq!(store.len(), 1);

    let registry = scripted_registry();
    let loaded = store
        .load("t1", &registry, dealer())
        .unwrap()
        .expect("стол сохранён");
    assert_eq!(loaded.players()[0].seat(), 1);
    assert!(store.load("missing", &registry, dealer()).unwrap().is_none());

    assert!(store.remove("t1"));
    assert!(!store.remove("t1"));
    assert!(store.is_empty());
}
