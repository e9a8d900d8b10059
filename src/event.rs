//! Semantic events emitted by applied transitions.
//!
//! Events are advisory: collaborators (sound, animation, logging) subscribe
//! through [`EventSink`] and nothing in the core depends on them being seen.

use crate::round::FaceoffChoice;
use crate::team::TeamId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum GameEvent {
    /// An answer was turned over and its points joined the pot.
    Reveal { index: usize, points: u64 },
    /// A team missed its face-off turn.
    FaceoffStrike { team: TeamId },
    /// The controlling team missed; `strikes` is the new count.
    Strike { strikes: u32 },
    FaceoffWinner { team: TeamId },
    FaceoffDecided { team: TeamId, choice: FaceoffChoice, controller: TeamId },
    /// The strike limit handed `team` a single steal guess.
    StealOpportunity { team: TeamId },
    StealSucceeded { team: TeamId },
    StealFailed { team: TeamId },
    /// Every answer shown without settling the round.
    BoardRevealed,
    RoundWon { team: TeamId, points: u64 },
    RoundStarted { round_index: usize, multiplier: u64 },
    /// `winner` is `None` on a tied final score.
    GameOver { winner: Option<TeamId> },
}

impl GameEvent {
    pub fn label(&self) -> &'static str {
        match self {
            GameEvent::Reveal { .. } => "reveal",
            GameEvent::FaceoffStrike { .. } => "faceoff-strike",
            GameEvent::Strike { .. } => "strike",
            GameEvent::FaceoffWinner { .. } => "faceoff-winner",
            GameEvent::FaceoffDecided { .. } => "faceoff-decide",
            GameEvent::StealOpportunity { .. } => "steal-opportunity",
            GameEvent::StealSucceeded { .. } => "steal-success",
            GameEvent::StealFailed { .. } => "steal-failure",
            GameEvent::BoardRevealed => "board-revealed",
            GameEvent::RoundWon { .. } => "round-win",
            GameEvent::RoundStarted { .. } => "round-start",
            GameEvent::GameOver { .. } => "game-over",
        }
    }
}

/// A subscriber notified after each applied transition.
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Sink that keeps every event it sees, in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.events.iter().map(GameEvent::label).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
