//! Persistence of the whole session as a versioned JSON document.
//!
//! The core never reads or writes storage on its own. A [`Host`](crate::host::Host)
//! hands every applied session to a [`SessionStore`]; failures there are
//! reported to the caller and never undo the transition.

use crate::session::GameSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format version written into every saved document.
pub const STORE_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    #[error("failed to serialize session")]
    Serialize(#[source] serde_json::Error),
    #[error("saved session is corrupt")]
    Corrupt(#[source] serde_json::Error),
    #[error("unsupported save version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// On-disk envelope around a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSession {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub session: GameSession,
}

impl SavedSession {
    pub fn new(session: GameSession) -> Self {
        Self { version: STORE_VERSION, saved_at: Utc::now(), session }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string(self).map_err(StoreError::Serialize)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let saved: SavedSession = serde_json::from_str(json).map_err(StoreError::Corrupt)?;
        if saved.version != STORE_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: saved.version,
                supported: STORE_VERSION,
            });
        }
        Ok(saved)
    }
}

/// Where a host keeps the latest session between runs.
pub trait SessionStore {
    fn save(&mut self, session: &GameSession) -> Result<(), StoreError>;
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<GameSession>, StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-process store holding the last saved document as JSON text.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing document, e.g. read by a front-end.
    pub fn from_blob(blob: impl Into<String>) -> Self {
        Self { blob: Some(blob.into()) }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl SessionStore for MemoryStore {
    fn save(&mut self, session: &GameSession) -> Result<(), StoreError> {
        self.blob = Some(SavedSession::new(session.clone()).to_json()?);
        Ok(())
    }

    fn load(&self) -> Result<Option<GameSession>, StoreError> {
        self.blob.as_deref().map(|b| SavedSession::from_json(b).map(|s| s.session)).transpose()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.blob = None;
        Ok(())
    }
}
