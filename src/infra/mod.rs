//! Инфраструктурный слой вокруг движка стола:
//! - RNG-реализации для дилера;
//! - очередь действий и игрок, который из неё играет;
//! - реестр игроков для восстановления;
//! - JSON-снэпшоты и in-memory хранилище столов.

pub mod persistence;
pub mod queue;
pub mod registry;
pub mod rng;
pub mod scripted;

pub use persistence::{decode_table, encode_table, InMemoryTableStore, PersistError};
pub use queue::{action_queue, ActionFeed, ActionQueue, QueueError};
pub use registry::PlayerRegistry;
pub use rng::*;
pub use scripted::ScriptedPlayer;
