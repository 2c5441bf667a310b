//! Тесты универсального исполнителя автоматов.
//!
//! Здесь мы проверяем:
//! - трассу выполненных состояний и строки лога;
//! - хук reset (ровно один раз);
//! - терминальность ошибки (после неё ничего не выполняется);
//! - пошаговый режим и MockExecutor.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;

use card_table::engine::{Action, Bid};
use card_table::infra::{action_queue, ActionQueue};
use card_table::statemachine::{
    Executor, ExecutorError, MockExecutor, StateExecutor, StateMachine, StateName, StepOutcome,
};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Start,
    Bid,
    Middle,
    End,
    Error,
}

impl StateName for Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Start => "Start",
            Phase::Bid => "Bid",
            Phase::Middle => "Middle",
            Phase::End => "End",
            Phase::Error => "Error",
        }
    }
}

#[derive(Debug, Error)]
enum MachineError {
    #[error("error")]
    Failed,

    #[error("заявки кончились")]
    NoBids,
}

/// Простой автомат торговли: заявки берутся из очереди, первая масть закрывает торговлю.
struct BiddingMachine {
    fail: bool,
    call_trace: Vec<&'static str>,
    bids: Vec<Bid>,
    resets: usize,
    actions: ActionQueue,
}

impl BiddingMachine {
    fn new(actions: ActionQueue, fail: bool) -> Self {
        Self {
            fail,
            call_trace: Vec::new(),
            bids: Vec::new(),
            resets: 0,
            actions,
        }
    }
}

impl StateMachine for BiddingMachine {
    type State = Phase;
    type Error = MachineError;

    fn step(&mut self, state: Phase) -> Result<Option<Phase>, MachineError> {
        self.call_trace.push(state.name());
        match state {
            Phase::Start => Ok(Some(Phase::Bid)),
            Phase::Bid => {
                let bid = match self.actions.take() {
                    Ok(Action::Bid(bid)) => bid,
                    Ok(_) => return Ok(Some(Phase::Bid)),
                    Err(_) => return Err(MachineError::NoBids),
                };
                self.bids.push(bid);
                match bid {
                    Bid::Call(_) => Ok(Some(Phase::Middle)),
                    Bid::Pass => Ok(Some(Phase::Bid)),
                }
            }
            Phase::Middle if self.fail => Ok(Some(Phase::Error)),
            Phase::Middle => Ok(Some(Phase::End)),
            Phase::End => Ok(None),
            Phase::Error => Err(MachineError::Failed),
        }
    }
}

/// Утилита: очередь с заявками, которые пишет отдельный поток.
fn feed_bids(bids: &[&str]) -> ActionQueue {
    let (feed, queue) = action_queue(1);
    let bids: Vec<Bid> = bids.iter().map(|b| b.parse().expect("заявка из словаря")).collect();
    thread::spawn(move || {
        for bid in bids {
            feed.push_wait(Action::Bid(bid)).expect("очередь жива");
        }
    });
    queue
}

/// Утилита: лог, который можно прочитать после выполнения.
fn capture_log() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
    let msgs = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&msgs);
    (msgs, move |line: &str| sink.borrow_mut().push(line.to_string()))
}

const BIDS: [&str; 4] = ["pass", "pass", "pass", "hearts"];

//
// ====================== УСПЕШНОЕ ВЫПОЛНЕНИЕ ======================
//

#[test]
fn execute_records_trace_and_log() {
    let mut machine = BiddingMachine::new(feed_bids(&BIDS), false);
    let (msgs, facility) = capture_log();

    let mut exec = StateExecutor::new("tester", Phase::Start)
        .with_reset(|m: &mut BiddingMachine| {
            m.resets += 1;
            m.call_trace.clear();
        })
        .with_log_facility(facility);
    exec.log(true);

    exec.execute(&mut machine).expect("автомат должен дойти до конца");

    assert_eq!(
        exec.node_names(),
        vec!["Start", "Bid", "Bid", "Bid", "Bid", "Middle", "End"]
    );
    assert_eq!(machine.call_trace, exec.node_names(), "трасса автомата = трасса исполнителя");
    assert_eq!(machine.resets, 1, "reset вызывается ровно один раз");
    assert_eq!(machine.bids.last(), Some(&Bid::Call(card_table::domain::Suit::Hearts)));

    let mut expected: Vec<String> = Vec::new();
    for name in ["Start", "Bid", "Bid", "Bid", "Bid", "Middle", "End"] {
        expected.push(format!("StateMachine[tester]: StateFn({name}) starting"));
        expected.push(format!("StateMachine[tester]: StateFn({name}) finished"));
    }
    expected.push("StateMachine[tester]: Execute() completed with no issues".to_string());
    expected.push(
        "StateMachine[tester]: The following is the StateFn's called with this execution:"
            .to_string(),
    );
    for name in ["Start", "Bid", "Bid", "Bid", "Bid", "Middle", "End"] {
        expected.push(format!("StateMachine[tester]: \t{name}"));
    }
    assert_eq!(*msgs.borrow(), expected);
}

#[test]
fn logging_disabled_writes_nothing() {
    let mut machine = BiddingMachine::new(feed_bids(&BIDS), false);
    let (msgs, facility) = capture_log();

    let mut exec = StateExecutor::new("quiet", Phase::Start).with_log_facility(facility);
    exec.log(false);
    exec.execute(&mut machine).expect("без ошибок");

    assert!(msgs.borrow().is_empty(), "лог выключен – сообщений нет");
    assert_eq!(exec.nodes().len(), 7);
}

//
// ====================== ОШИБКИ ======================
//

#[test]
fn error_state_halts_machine() {
    let mut machine = BiddingMachine::new(feed_bids(&BIDS), true);
    let mut exec = StateExecutor::new("tester", Phase::Start);

    let err = exec.execute(&mut machine).expect_err("Error должен вернуть ошибку");
    match err {
        ExecutorError::Failed { state, .. } => assert_eq!(state, "Error"),
        other => panic!("ожидали Failed, получили {other:?}"),
    }
    assert_eq!(exec.nodes().last(), Some(&Phase::Error));
    assert_eq!(machine.call_trace, exec.node_names());
    assert!(exec.is_halted());

    // Повторный запуск ничего не выполняет и ничего не дописывает.
    let len = exec.nodes().len();
    let again = exec.execute(&mut machine).expect_err("автомат остановлен");
    assert!(matches!(again, ExecutorError::Halted { .. }));
    assert!(matches!(exec.step(&mut machine), Err(ExecutorError::Halted { .. })));
    assert_eq!(exec.nodes().len(), len);
    assert_eq!(
        exec.nodes().iter().filter(|s| **s == Phase::Error).count(),
        1,
        "Error в трассе ровно один раз"
    );
}

#[test]
fn error_is_logged_with_trace() {
    let mut machine = BiddingMachine::new(feed_bids(&BIDS), true);
    let (msgs, facility) = capture_log();
    let mut exec = StateExecutor::new("tester", Phase::Start).with_log_facility(facility);
    exec.log(true);

    assert!(exec.execute(&mut machine).is_err());

    let msgs = msgs.borrow();
    assert!(msgs.contains(&"StateMachine[tester]: Execute() completed with error: error".to_string()));
    assert_eq!(msgs.last().map(String::as_str), Some("StateMachine[tester]: \tError"));
}

#[test]
fn closed_queue_surfaces_as_error() {
    let mut machine = BiddingMachine::new(feed_bids(&["pass"]), false);
    let mut exec = StateExecutor::new("tester", Phase::Start);

    let err = exec.execute(&mut machine).expect_err("заявки кончились");
    assert!(matches!(err, ExecutorError::Failed { state: "Bid", .. }));
    assert_eq!(exec.node_names(), vec!["Start", "Bid", "Bid"]);
}

//
// ====================== ПОШАГОВЫЙ РЕЖИМ ======================
//

#[test]
fn step_runs_one_state_at_a_time() {
    let mut machine = BiddingMachine::new(feed_bids(&BIDS), false);
    let mut exec = StateExecutor::new("stepper", Phase::Start);

    assert_eq!(exec.step(&mut machine).unwrap(), StepOutcome::Continue(Phase::Bid));
    assert_eq!(exec.nodes(), &[Phase::Start]);
    assert_eq!(exec.current(), Some(Phase::Bid));

    let mut steps = 1;
    while exec.step(&mut machine).unwrap() != StepOutcome::Finished {
        steps += 1;
    }
    assert_eq!(steps, 6);
    assert!(exec.is_finished());

    // После конца шаг ничего не делает.
    assert_eq!(exec.step(&mut machine).unwrap(), StepOutcome::Finished);
    assert_eq!(exec.nodes().len(), 7);
}

#[test]
fn clear_nodes_keeps_position() {
    let mut machine = BiddingMachine::new(feed_bids(&BIDS), false);
    let mut exec = StateExecutor::new("clear", Phase::Start);
    exec.step(&mut machine).unwrap();

    exec.clear_nodes();
    assert!(exec.nodes().is_empty());
    assert_eq!(exec.current(), Some(Phase::Bid));

    exec.step(&mut machine).unwrap();
    assert_eq!(exec.node_names(), vec!["Bid"]);
}

//
// ====================== MOCK ======================
//

/// Утилита: код, которому всё равно, какой исполнитель ему дали.
fn run_and_count<E: Executor<BiddingMachine>>(exec: &mut E, machine: &mut BiddingMachine) -> usize {
    let _ = exec.execute(machine);
    exec.nodes().len()
}

#[test]
fn mock_executor_returns_canned_trace() {
    let mut machine = BiddingMachine::new(ActionQueue::closed(), false);
    let mut mock: MockExecutor<BiddingMachine> = MockExecutor::new("mock").with_nodes(vec![Phase::Start, Phase::End]);

    assert_eq!(run_and_count(&mut mock, &mut machine), 2);
    assert_eq!(mock.name(), "mock");
    assert!(machine.call_trace.is_empty(), "mock не трогает автомат");
}

#[test]
fn mock_executor_can_fail() {
    let mut machine = BiddingMachine::new(ActionQueue::closed(), false);
    let mut mock: MockExecutor<BiddingMachine> = MockExecutor::new("mock")
        .with_nodes(vec![Phase::Start, Phase::Error])
        .failing();

    let err = mock.execute(&mut machine).expect_err("mock настроен на ошибку");
    assert!(matches!(err, ExecutorError::Halted { state: "Error", .. }));
    assert_eq!(mock.nodes(), &[Phase::Start, Phase::Error]);
}
