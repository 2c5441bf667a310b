//! Универсальный исполнитель конечных автоматов.
//!
//! Автомат описывается двумя вещами:
//!   - `StateMachine::State` – перечисление состояний (тег + имя для трассировки);
//!   - `StateMachine::step` – функция перехода: выполнить одно состояние и
//!     вернуть следующее, `None` (конец) или ошибку (остановка).
//!
//! `StateExecutor` крутит автомат по одному состоянию (`step`) или до конца
//! (`execute`), ведёт трассу выполненных состояний и, если включено,
//! пишет человекочитаемый лог.

pub mod mock;

use core::fmt;

use thiserror::Error;
use tracing::trace;

pub use mock::MockExecutor;

/// Имя состояния для трассы и лога. Выводится из самого значения состояния,
/// поэтому одно и то же логическое состояние всегда трассируется одинаково.
pub trait StateName {
    fn name(&self) -> &'static str;
}

/// Автомат, который умеет выполнить одно состояние.
pub trait StateMachine {
    type State: StateName + Copy + fmt::Debug + PartialEq;
    type Error: std::error::Error + 'static;

    /// Выполнить `state`:
    /// - `Ok(Some(next))` – продолжить с `next`;
    /// - `Ok(None)` – автомат завершился;
    /// - `Err(e)` – ошибка, выполнение останавливается окончательно.
    fn step(&mut self, state: Self::State) -> Result<Option<Self::State>, Self::Error>;
}

/// Ошибки исполнителя.
#[derive(Debug, Error)]
pub enum ExecutorError<E>
where
    E: std::error::Error + 'static,
{
    #[error("StateMachine[{machine}]: StateFn({state}) завершился ошибкой: {source}")]
    Failed {
        machine: String,
        state: &'static str,
        #[source]
        source: E,
    },

    #[error("StateMachine[{machine}]: автомат остановлен после ошибки в StateFn({state})")]
    Halted {
        machine: String,
        state: &'static str,
    },
}

/// Результат одного шага.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome<S> {
    /// Следующим будет выполнено это состояние.
    Continue(S),
    /// Автомат дошёл до конца.
    Finished,
}

/// Общий контракт исполнителя – чтобы зависимый код можно было
/// тестировать с `MockExecutor`.
pub trait Executor<M: StateMachine> {
    fn name(&self) -> &str;

    /// Выполнить автомат до конца или до ошибки.
    fn execute(&mut self, machine: &mut M) -> Result<(), ExecutorError<M::Error>>;

    /// Трасса выполненных состояний.
    fn nodes(&self) -> &[M::State];
}

type LogFacility = Box<dyn FnMut(&str)>;
type ResetHook<M> = Box<dyn FnMut(&mut M)>;

/// Исполнитель автомата `M`.
pub struct StateExecutor<M: StateMachine> {
    name: String,
    current: Option<M::State>,
    nodes: Vec<M::State>,
    /// Состояние, на котором автомат упал.
    failed_at: Option<M::State>,
    started: bool,
    log: bool,
    log_facility: Option<LogFacility>,
    reset: Option<ResetHook<M>>,
}

impl<M: StateMachine> StateExecutor<M> {
    /// Новый исполнитель, который начнёт с `start`.
    pub fn new(name: impl Into<String>, start: M::State) -> Self {
        Self {
            name: name.into(),
            current: Some(start),
            nodes: Vec::new(),
            failed_at: None,
            started: false,
            log: false,
            log_facility: None,
            reset: None,
        }
    }

    /// Хук, который вызывается один раз перед первым состоянием.
    pub fn with_reset(mut self, reset: impl FnMut(&mut M) + 'static) -> Self {
        self.reset = Some(Box::new(reset));
        self
    }

    /// Куда писать лог (при включённом логировании).
    /// Без него сообщения уходят в `tracing`.
    pub fn with_log_facility(mut self, facility: impl FnMut(&str) + 'static) -> Self {
        self.log_facility = Some(Box::new(facility));
        self
    }

    pub fn set_log_facility(&mut self, facility: impl FnMut(&str) + 'static) {
        self.log_facility = Some(Box::new(facility));
    }

    /// Включить/выключить лог.
    pub fn log(&mut self, enabled: bool) {
        self.log = enabled;
    }

    pub fn node_names(&self) -> Vec<&'static str> {
        self.nodes.iter().map(|s| s.name()).collect()
    }

    /// Забыть трассу. Остальное (текущее состояние, лог) не меняется.
    pub fn clear_nodes(&mut self) {
        self.nodes.clear();
    }

    /// Какое состояние выполнится следующим (None – автомат закончил или упал).
    pub fn current(&self) -> Option<M::State> {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.current.is_none() && self.failed_at.is_none()
    }

    pub fn is_halted(&self) -> bool {
        self.failed_at.is_some()
    }

    /// Выполнить ровно одно состояние.
    pub fn step(&mut self, machine: &mut M) -> Result<StepOutcome<M::State>, ExecutorError<M::Error>> {
        if let Some(failed) = self.failed_at {
            return Err(ExecutorError::Halted {
                machine: self.name.clone(),
                state: failed.name(),
            });
        }

        let Some(state) = self.current else {
            return Ok(StepOutcome::Finished);
        };

        if !self.started {
            self.started = true;
            if let Some(reset) = self.reset.as_mut() {
                reset(machine);
            }
        }

        trace!(machine = %self.name, state = state.name(), "state unit");
        self.logf(format_args!("StateFn({}) starting", state.name()));
        self.nodes.push(state);
        let result = machine.step(state);
        self.logf(format_args!("StateFn({}) finished", state.name()));

        match result {
            Ok(Some(next)) => {
                self.current = Some(next);
                Ok(StepOutcome::Continue(next))
            }
            Ok(None) => {
                self.current = None;
                self.logf(format_args!("Execute() completed with no issues"));
                self.log_trace();
                Ok(StepOutcome::Finished)
            }
            Err(source) => {
                self.current = None;
                self.failed_at = Some(state);
                self.logf(format_args!("Execute() completed with error: {source}"));
                self.log_trace();
                Err(ExecutorError::Failed {
                    machine: self.name.clone(),
                    state: state.name(),
                    source,
                })
            }
        }
    }

    fn log_trace(&mut self) {
        if !self.log {
            return;
        }
        let names = self.node_names();
        self.logf(format_args!("The following is the StateFn's called with this execution:"));
        for name in names {
            self.logf(format_args!("\t{name}"));
        }
    }

    fn logf(&mut self, msg: fmt::Arguments<'_>) {
        if !self.log {
            return;
        }
        let line = format!("StateMachine[{}]: {}", self.name, msg);
        match self.log_facility.as_mut() {
            Some(facility) => facility(&line),
            None => tracing::debug!("{line}"),
        }
    }
}

impl<M: StateMachine> Executor<M> for StateExecutor<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&mut self, machine: &mut M) -> Result<(), ExecutorError<M::Error>> {
        loop {
            if let StepOutcome::Finished = self.step(machine)? {
                return Ok(());
            }
        }
    }

    fn nodes(&self) -> &[M::State] {
        &self.nodes
    }
}
