use std::collections::HashMap;

use crate::engine::player::{Player, PlayerError};
use crate::infra::persistence::PersistError;

type Factory = Box<dyn Fn(&str) -> Result<Box<dyn Player>, PlayerError>>;

/// Кто умеет восстанавливать игроков по id при загрузке стола.
///
/// Сначала ищется фабрика для конкретного id, потом – общая (`register`).
#[derive(Default)]
pub struct PlayerRegistry {
    by_id: HashMap<String, Factory>,
    fallback: Option<Factory>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Общая фабрика: любой id восстанавливается через `P::from_id`.
    pub fn register<P: Player + 'static>(&mut self) -> &mut Self {
        self.fallback = Some(Box::new(|id: &str| {
            P::from_id(id).map(|p| Box::new(p) as Box<dyn Player>)
        }));
        self
    }

    /// Своя фабрика для одного id.
    pub fn register_id(
        &mut self,
        id: impl Into<String>,
        factory: impl Fn(&str) -> Result<Box<dyn Player>, PlayerError> + 'static,
    ) -> &mut Self {
        self.by_id.insert(id.into(), Box::new(factory));
        self
    }

    pub fn restore(&self, id: &str) -> Result<Box<dyn Player>, PersistError> {
        let factory = self
            .by_id
            .get(id)
            .or(self.fallback.as_ref())
            .ok_or_else(|| PersistError::UnknownPlayer(id.to_string()))?;
        Ok(factory(id)?)
    }
}
