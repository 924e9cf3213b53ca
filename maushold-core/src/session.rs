//! Persisted active-player session.
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::SessionError;
use crate::model::{Player, PlayerId};

pub const SESSION_STORAGE_KEY: &str = "maushold.session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub player: Player,
}

impl Session {
    #[must_use]
    pub const fn new(player: Player) -> Self {
        Self { player }
    }

    #[must_use]
    pub const fn player_id(&self) -> PlayerId {
        self.player.id
    }
}

/// String key-value store that survives reloads.
pub trait SessionStorage {
    /// # Errors
    ///
    /// Returns an error when the backing store cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// # Errors
    ///
    /// Returns an error when the backing store rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// # Errors
    ///
    /// Returns an error when the backing store cannot be modified.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// # Errors
///
/// Fails when the store cannot be read or holds malformed JSON.
pub fn load_session<S: SessionStorage + ?Sized>(storage: &S) -> Result<Option<Session>, SessionError> {
    storage
        .read(SESSION_STORAGE_KEY)?
        .map(|raw| serde_json::from_str(&raw).map_err(SessionError::from))
        .transpose()
}

/// Load the session, discarding an unreadable entry instead of failing.
pub fn restore_session<S: SessionStorage + ?Sized>(storage: &S) -> Option<Session> {
    match load_session(storage) {
        Ok(session) => session,
        Err(err) => {
            log::warn!("discarding stored session: {err}");
            if let Err(clear_err) = storage.remove(SESSION_STORAGE_KEY) {
                log::warn!("failed to clear stored session: {clear_err}");
            }
            None
        }
    }
}

/// # Errors
///
/// Fails when serialization or the write fails.
pub fn save_session<S: SessionStorage + ?Sized>(
    storage: &S,
    session: &Session,
) -> Result<(), SessionError> {
    let raw = serde_json::to_string(session)?;
    storage.write(SESSION_STORAGE_KEY, &raw)
}

/// # Errors
///
/// Fails when the entry cannot be removed.
pub fn clear_session<S: SessionStorage + ?Sized>(storage: &S) -> Result<(), SessionError> {
    storage.remove(SESSION_STORAGE_KEY)
}

/// In-process store for native runs and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl SessionStorage for MemorySessionStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
