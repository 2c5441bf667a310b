//! Очередь действий и игрок, который из неё играет.
//!
//! Кончившийся сценарий – это ошибка игрока, а не паника:
//! стол уходит в Error, отдаёт фатальную ошибку и дальше стоит.

use std::thread;

use card_table::domain::{Chips, Config, Game, Parameters, Stakes};
use card_table::engine::{
    Action, CardDealer, EngineError, PlayerError, PokerTable, TableError, TableState,
};
use card_table::infra::{action_queue, ActionQueue, DeterministicRng, QueueError, ScriptedPlayer};
use card_table::statemachine::ExecutorError;

/// Утилита: стол один на один.
fn heads_up(game: Game) -> PokerTable {
    let config = Config {
        game,
        stakes: Stakes::new(Chips(1), Chips(2), Chips::ZERO),
        num_of_seats: 2,
        ..Config::default()
    };
    PokerTable::new(config, Box::new(CardDealer::new(DeterministicRng::from_u64(11)))).unwrap()
}

//
// ====================== ОЧЕРЕДЬ ======================
//

#[test]
fn bounded_queue_reports_full_and_closed() {
    let (feed, queue) = action_queue(2);
    feed.fold().unwrap();
    feed.call().unwrap();
    assert_eq!(feed.check(), Err(QueueError::Full));

    assert_eq!(queue.take_now(), Ok(Action::Fold));
    assert_eq!(queue.take(), Ok(Action::Call));
    assert_eq!(queue.take_now(), Err(QueueError::Exhausted));

    drop(queue);
    assert_eq!(feed.bet(5), Err(QueueError::Closed));
}

#[test]
fn closed_queue_is_exhausted() {
    let queue = ActionQueue::closed();
    assert_eq!(queue.take(), Err(QueueError::Exhausted));
    assert_eq!(queue.take_now(), Err(QueueError::Exhausted));
}

//
// ====================== КОНЧИВШИЙСЯ СЦЕНАРИЙ ======================
//

#[test]
fn exhausted_script_halts_table() {
    let mut table = heads_up(Game::Tarabish);
    let (_f0, q0) = action_queue(1);
    let (_f1, q1) = action_queue(1);
    table.sit(Box::new(ScriptedPlayer::new("1", q0)), Parameters::new(0, Chips::ZERO)).unwrap();
    table.sit(Box::new(ScriptedPlayer::new("2", q1)), Parameters::new(1, Chips::ZERO)).unwrap();

    table.next().expect("Start");
    assert_eq!(table.action(), Some(0));

    // Шаг, где игрок не ответил, сам проходит: автомат переходит в Error.
    let progress = table.next().expect("ошибка отдаётся на следующем шаге");
    assert!(!progress.done);
    assert_eq!(table.action(), None);

    let err = table.next().expect_err("Error – фатальная ошибка");
    assert!(err.is_fatal());
    match err {
        TableError::Engine(ExecutorError::Failed { state, source, .. }) => {
            assert_eq!(state, "Error");
            assert_eq!(
                source,
                EngineError::Player {
                    seat: 0,
                    source: PlayerError::ScriptExhausted {
                        player: "1".to_string()
                    },
                }
            );
        }
        other => panic!("ожидали Failed, получили {other:?}"),
    }

    // Дальше стол стоит, трасса не растёт.
    let err = table.next().expect_err("стол остановлен");
    assert!(matches!(err, TableError::Engine(ExecutorError::Halted { .. })));
    assert_eq!(table.node_names(), vec!["Start", "Bid", "Error"]);
    assert_eq!(
        table.nodes().iter().filter(|s| **s == TableState::Error).count(),
        1
    );
    assert!(table.is_halted());
    assert!(!table.is_done());
}

#[test]
fn dropped_feed_with_blocking_player_fails() {
    let mut table = heads_up(Game::Holdem);
    let (feed, queue) = action_queue(1);
    let (_f0, q0) = action_queue(1);
    table.sit(Box::new(ScriptedPlayer::new("a", q0)), Parameters::new(0, Chips(20))).unwrap();
    table
        .sit(Box::new(ScriptedPlayer::blocking("b", queue)), Parameters::new(1, Chips(20)))
        .unwrap();
    drop(feed);

    table.next().unwrap();
    table.next().expect("ошибка игрока переводит в Error");
    assert_eq!(table.nodes().last(), Some(&TableState::Act));
    assert!(matches!(table.next(), Err(TableError::Engine(ExecutorError::Failed { .. }))));
}

//
// ====================== ПОТОКИ ======================
//

#[test]
fn blocking_player_waits_for_producer_thread() {
    let mut table = heads_up(Game::Holdem);
    let (feed_a, queue_a) = action_queue(1);
    let (feed_b, queue_b) = action_queue(1);
    table
        .sit(Box::new(ScriptedPlayer::blocking("a", queue_a)), Parameters::new(0, Chips(20)))
        .unwrap();
    table
        .sit(Box::new(ScriptedPlayer::blocking("b", queue_b)), Parameters::new(1, Chips(20)))
        .unwrap();

    // Кнопка (место 1) колит, большой блайнд чекает до конца.
    let producer = thread::spawn(move || {
        feed_b.push_wait(Action::Call).unwrap();
        feed_a.push_wait(Action::Check).unwrap();
        for _ in 0..3 {
            feed_a.push_wait(Action::Check).unwrap();
            feed_b.push_wait(Action::Check).unwrap();
        }
    });

    let mut results = None;
    for _ in 0..32 {
        let progress = table.next().expect("ход пришёл из другого потока");
        if progress.results.is_some() {
            results = progress.results;
            break;
        }
    }
    producer.join().expect("поставщик отработал");

    let results = results.expect("раздача дошла до расчёта");
    let total: Chips = results.values().flatten().map(|r| r.amount).sum();
    assert_eq!(total, Chips(4));
    assert_eq!(table.hands_played(), 1);
}
