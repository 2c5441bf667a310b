//! Посадка за стол и конфиг.
//!
//! Здесь мы проверяем:
//! - порядок ошибок sit: AlreadySeated → InvalidSeat → SeatOccupied;
//! - players() отдаёт только занятые места;
//! - стол не начинает раздачу, пока игроков меньше двух;
//! - проверки Config.

use card_table::domain::{
    Chips, Config, ConfigError, Game, Limit, Parameters, SeatStatus, Stakes,
};
use card_table::engine::{
    CardDealer, PokerTable, SeatingError, TableError, TableState,
};
use card_table::infra::{action_queue, ActionFeed, DeterministicRng, ScriptedPlayer};

/// Утилита: конфиг холдема 1/2 без анте.
fn holdem_config(seats: u8) -> Config {
    Config {
        game: Game::Holdem,
        limit: Limit::NoLimit,
        stakes: Stakes::new(Chips(1), Chips(2), Chips::ZERO),
        num_of_seats: seats,
        ..Config::default()
    }
}

/// Утилита: стол с детерминированной колодой.
fn make_table(config: Config) -> PokerTable {
    PokerTable::new(config, Box::new(CardDealer::new(DeterministicRng::from_u64(7))))
        .expect("конфиг корректный")
}

/// Утилита: игрок с очередью действий.
fn player(id: &str) -> (ActionFeed, Box<ScriptedPlayer>) {
    let (feed, queue) = action_queue(16);
    (feed, Box::new(ScriptedPlayer::new(id, queue)))
}

#[test]
fn seating_errors_come_in_order() {
    let mut table = make_table(holdem_config(6));

    let (_f1, p1) = player("1");
    let (_f1dup, p1_dup) = player("1");
    let (_f2, p2) = player("2");

    table.sit(p1, Parameters::new(0, Chips(100))).expect("место 0 свободно");

    assert_eq!(
        table.sit(p1_dup, Parameters::new(1, Chips(100))),
        Err(SeatingError::AlreadySeated)
    );

    let (_f, p2_copy) = player("2");
    assert_eq!(
        table.sit(p2_copy, Parameters::new(6, Chips(100))),
        Err(SeatingError::InvalidSeat)
    );
    assert_eq!(
        table.sit(p2, Parameters::new(0, Chips(100))),
        Err(SeatingError::SeatOccupied)
    );
}

#[test]
fn already_seated_wins_over_invalid_seat() {
    let mut table = make_table(holdem_config(2));
    let (_f1, p1) = player("1");
    let (_f2, p1_again) = player("1");

    table.sit(p1, Parameters::new(0, Chips(10))).unwrap();
    assert_eq!(
        table.sit(p1_again, Parameters::new(9, Chips(10))),
        Err(SeatingError::AlreadySeated)
    );
}

#[test]
fn tarabish_seats_without_chips() {
    let config = Config {
        game: Game::Tarabish,
        num_of_seats: 4,
        ..Config::default()
    };
    let mut table = make_table(config);

    let (_f1, p1) = player("1");
    let (_f2, p2) = player("2");
    table.sit(p1, Parameters { seat: 0, ..Default::default() }).unwrap();
    assert_eq!(
        table.sit(p2, Parameters { seat: 4, ..Default::default() }),
        Err(SeatingError::InvalidSeat)
    );
    assert_eq!(table.players().len(), 1);
}

#[test]
fn players_lists_only_occupied_seats() {
    let mut table = make_table(holdem_config(6));
    let (_f1, p1) = player("alice");
    let (_f2, p2) = player("bob");
    table.sit(p1, Parameters::new(4, Chips(50))).unwrap();
    table.sit(p2, Parameters::new(1, Chips(70))).unwrap();

    let players = table.players();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].seat(), 1, "места идут по возрастанию");
    assert_eq!(players[0].player_id(), Some("bob"));
    assert_eq!(players[1].chips(), Chips(50));
    assert_eq!(table.seats().len(), 6);
    assert_eq!(table.seat(2).and_then(|s| s.player), None);
}

#[test]
fn start_needs_two_players() {
    let mut table = make_table(holdem_config(6));
    let (_f1, p1) = player("1");
    table.sit(p1, Parameters::new(0, Chips(100))).unwrap();

    let err = table.next().expect_err("одному играть нельзя");
    assert!(matches!(err, TableError::NotEnoughPlayers));
    assert!(!err.is_fatal());
    assert_eq!(table.nodes(), &[TableState::Start]);
    assert_eq!(table.action(), None);

    // Второй игрок сел – раздача начинается.
    let (_f2, p2) = player("2");
    table.sit(p2, Parameters::new(3, Chips(100))).unwrap();
    let progress = table.next().expect("теперь можно");
    assert!(!progress.done);
    assert!(table.action().is_some());
    assert_eq!(table.pot().total(), Chips(3));
}

#[test]
fn late_seat_waits_for_next_hand() {
    let mut table = make_table(holdem_config(6));
    let (_f1, p1) = player("1");
    let (_f2, p2) = player("2");
    table.sit(p1, Parameters::new(0, Chips(100))).unwrap();
    table.sit(p2, Parameters::new(1, Chips(100))).unwrap();
    table.next().unwrap();

    let (_f3, p3) = player("3");
    table.sit(p3, Parameters::new(2, Chips(100))).unwrap();
    let late = table.seat(2).unwrap();
    assert_eq!(late.status, SeatStatus::Waiting);
    assert!(!late.can_raise());
}

#[test]
fn config_is_validated() {
    let dealer = || Box::new(CardDealer::new(DeterministicRng::from_u64(1)));

    assert!(matches!(
        PokerTable::new(holdem_config(1), dealer()),
        Err(ConfigError::SeatCount(1))
    ));

    let tarabish = Config {
        game: Game::Tarabish,
        num_of_seats: 5,
        ..Config::default()
    };
    assert!(matches!(
        PokerTable::new(tarabish, dealer()),
        Err(ConfigError::TarabishSeatCount(5))
    ));

    let upside_down = Config {
        stakes: Stakes::new(Chips(5), Chips(2), Chips::ZERO),
        ..holdem_config(4)
    };
    assert!(matches!(
        upside_down.validate(),
        Err(ConfigError::StakesOrder { .. })
    ));
}

#[test]
fn config_loads_from_json() {
    let json = r#"{
        "game": "Holdem",
        "limit": "PotLimit",
        "stakes": { "small_bet": 1, "big_bet": 2, "ante": 0 },
        "num_of_seats": 6
    }"#;
    let config = Config::from_json(json).expect("валидный JSON");
    assert_eq!(config.limit, Limit::PotLimit);
    assert_eq!(config.stakes.big_bet, Chips(2));

    assert!(matches!(Config::from_json("{"), Err(ConfigError::Json(_))));
}
