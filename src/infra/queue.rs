//! Ограниченная очередь действий: тест или фронтенд кладёт действия,
//! игрок за столом забирает их по одному на каждый ход.

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};

use thiserror::Error;

use crate::domain::chips::Chips;
use crate::engine::actions::{Action, Bid};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("Очередь действий заполнена")]
    Full,

    #[error("Очередь действий закрыта")]
    Closed,

    #[error("Действия в очереди кончились")]
    Exhausted,
}

/// Создать очередь на `capacity` действий.
pub fn action_queue(capacity: usize) -> (ActionFeed, ActionQueue) {
    let (tx, rx) = mpsc::sync_channel(capacity);
    (ActionFeed { tx }, ActionQueue { rx })
}

/// Сторона, которая кладёт действия.
#[derive(Clone, Debug)]
pub struct ActionFeed {
    tx: SyncSender<Action>,
}

impl ActionFeed {
    /// Положить без ожидания.
    pub fn push(&self, action: Action) -> Result<(), QueueError> {
        self.tx.try_send(action).map_err(|e| match e {
            TrySendError::Full(_) => QueueError::Full,
            TrySendError::Disconnected(_) => QueueError::Closed,
        })
    }

    /// Положить, дождавшись места в очереди.
    pub fn push_wait(&self, action: Action) -> Result<(), QueueError> {
        self.tx.send(action).map_err(|_| QueueError::Closed)
    }

    pub fn fold(&self) -> Result<(), QueueError> {
        self.push(Action::Fold)
    }

    pub fn check(&self) -> Result<(), QueueError> {
        self.push(Action::Check)
    }

    pub fn call(&self) -> Result<(), QueueError> {
        self.push(Action::Call)
    }

    pub fn bet(&self, amount: u64) -> Result<(), QueueError> {
        self.push(Action::Bet(Chips(amount)))
    }

    pub fn raise(&self, amount: u64) -> Result<(), QueueError> {
        self.push(Action::Raise(Chips(amount)))
    }

    /// Заявка в торговле Тарабиша.
    pub fn bid(&self, bid: Bid) -> Result<(), QueueError> {
        self.push(Action::Bid(bid))
    }
}

/// Сторона, которая забирает действия.
#[derive(Debug)]
pub struct ActionQueue {
    rx: Receiver<Action>,
}

impl ActionQueue {
    /// Очередь без поставщика: сразу пустая и закрытая.
    pub fn closed() -> Self {
        let (_, rx) = mpsc::sync_channel(0);
        Self { rx }
    }

    /// Дождаться следующего действия. Поставщик ушёл и очередь пуста – `Exhausted`.
    pub fn take(&self) -> Result<Action, QueueError> {
        self.rx.recv().map_err(|_| QueueError::Exhausted)
    }

    /// Забрать действие, если оно уже есть.
    pub fn take_now(&self) -> Result<Action, QueueError> {
        self.rx.try_recv().map_err(|e| match e {
            TryRecvError::Empty => QueueError::Exhausted,
            TryRecvError::Disconnected => QueueError::Exhausted,
        })
    }
}
