//! Host: the stateful shell around a [`GameSession`].
//!
//! A `Host` owns the current session, applies actions to it, fans the
//! resulting events out to subscribers and persists the new state through an
//! optional [`SessionStore`]. Storage problems are logged and never roll a
//! transition back.

use crate::engine::FeudEngine;
use crate::event::{EventSink, GameEvent};
use crate::session::{Action, GamePhase, GameSession};
use crate::store::{SessionStore, StoreError};
use core::fmt;
use tracing::{debug, info, warn};

pub struct Host {
    session: GameSession,
    store: Option<Box<dyn SessionStore>>,
    sinks: Vec<Box<dyn EventSink>>,
    last_store_error: Option<String>,
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("phase", &self.session.phase())
            .field("round", &self.session.round_index())
            .field("store", &self.store.is_some())
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    /// A host in setup with no persistence.
    pub fn new() -> Self {
        Self { session: GameSession::new(), store: None, sinks: Vec::new(), last_store_error: None }
    }

    /// A fresh host that saves to `store` after every applied action.
    pub fn with_store(store: Box<dyn SessionStore>) -> Self {
        Self { store: Some(store), ..Self::new() }
    }

    /// Continue a saved game from `store` when one is in progress, otherwise
    /// start fresh. An unreadable save is cleared.
    pub fn resume(mut store: Box<dyn SessionStore>) -> Self {
        let session = match store.load() {
            Ok(Some(s)) if s.phase() != GamePhase::Setup => {
                info!(round = s.round_index(), "resumed saved session");
                s
            }
            Ok(_) => GameSession::new(),
            Err(err) => {
                warn!(%err, "discarding unreadable saved session");
                if let Err(err) = store.clear() {
                    warn!(%err, "failed to clear saved session");
                }
                GameSession::new()
            }
        };
        Self { session, store: Some(store), sinks: Vec::new(), last_store_error: None }
    }

    /// Register a subscriber for every event emitted from now on.
    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn into_session(self) -> GameSession {
        self.session
    }

    /// Message of the most recent storage failure, cleared by the next success.
    pub fn last_store_error(&self) -> Option<&str> {
        self.last_store_error.as_deref()
    }

    fn persist(&mut self, reset: bool) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        let result: Result<(), StoreError> = if reset {
            store.clear()
        } else if self.session.phase() == GamePhase::Setup {
            Ok(())
        } else {
            store.save(&self.session)
        };
        match result {
            Ok(()) => self.last_store_error = None,
            Err(err) => {
                warn!(%err, "failed to persist session");
                self.last_store_error = Some(err.to_string());
            }
        }
    }
}

impl FeudEngine for Host {
    fn dispatch(&mut self, action: Action) -> Vec<GameEvent> {
        let reset = matches!(action, Action::ResetAll);
        let session = std::mem::take(&mut self.session);
        let (next, events) = session.apply(action);
        self.session = next;
        for event in &events {
            debug!(event = event.label(), "event");
            for sink in &mut self.sinks {
                sink.on_event(event);
            }
        }
        self.persist(reset);
        events
    }

    fn session(&self) -> &GameSession {
        &self.session
    }
}
