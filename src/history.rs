//! Bounded undo history of full pre-transition snapshots.

use crate::round::RoundState;
use crate::settings::DEFAULT_HISTORY_LIMIT;
use crate::team::Teams;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// State captured just before a gameplay transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub(crate) teams: Teams,
    pub(crate) round_index: usize,
    pub(crate) round: Option<RoundState>,
    pub(crate) label: String,
    pub(crate) timestamp: DateTime<Utc>,
}

impl GameSnapshot {
    pub fn teams(&self) -> &Teams {
        &self.teams
    }

    pub fn round_index(&self) -> usize {
        self.round_index
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Human readable description of the transition this snapshot precedes.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Stack of snapshots; the oldest entry is dropped once `limit` is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    limit: usize,
    snapshots: VecDeque<GameSnapshot>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self { limit: limit.max(1), snapshots: VecDeque::new() }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn push(&mut self, snapshot: GameSnapshot) {
        while self.snapshots.len() >= self.limit {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    pub fn pop(&mut self) -> Option<GameSnapshot> {
        self.snapshots.pop_back()
    }

    pub fn latest(&self) -> Option<&GameSnapshot> {
        self.snapshots.back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Up to `n` most recent snapshots, oldest first.
    pub fn recent(&self, n: usize) -> Vec<&GameSnapshot> {
        let start = self.snapshots.len().saturating_sub(n);
        self.snapshots.range(start..).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.snapshots.iter().map(GameSnapshot::label).collect()
    }
}
