use tracing::trace;

use crate::engine::actions::Action;
use crate::engine::player::{Player, PlayerError, Turn};
use crate::infra::queue::{ActionQueue, QueueError};

/// Игрок, который берёт ходы из очереди действий.
///
/// По умолчанию не ждёт: если очередь пуста, это `ScriptExhausted`.
/// `blocking` ждёт поставщика (например, другой поток).
#[derive(Debug)]
pub struct ScriptedPlayer {
    id: String,
    queue: ActionQueue,
    blocking: bool,
}

impl ScriptedPlayer {
    pub fn new(id: impl Into<String>, queue: ActionQueue) -> Self {
        Self {
            id: id.into(),
            queue,
            blocking: false,
        }
    }

    pub fn blocking(id: impl Into<String>, queue: ActionQueue) -> Self {
        Self {
            blocking: true,
            ..Self::new(id, queue)
        }
    }
}

impl Player for ScriptedPlayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn action(&mut self, turn: &Turn) -> Result<Action, PlayerError> {
        let taken = if self.blocking {
            self.queue.take()
        } else {
            self.queue.take_now()
        };
        trace!(player = %self.id, seat = turn.seat, ?taken, "scripted action");
        taken.map_err(|e| match e {
            QueueError::Exhausted => PlayerError::ScriptExhausted {
                player: self.id.clone(),
            },
            QueueError::Full | QueueError::Closed => PlayerError::QueueClosed {
                player: self.id.clone(),
            },
        })
    }

    /// Восстановленный игрок приходит без заготовленных ходов.
    fn from_id(id: &str) -> Result<Self, PlayerError> {
        Ok(Self::new(id, ActionQueue::closed()))
    }
}
