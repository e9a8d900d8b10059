//! feud-core: game state engine for hosting a Family Feud style quiz night.
//!
//! Goals:
//! - Every transition is a pure function of the previous session and an action
//! - Invalid actions are no-ops; no panics for bad input
//! - Full-snapshot undo within a round
//! - Persistence and presentation stay outside the core
//!
//! ## Quick start: play a round
//! ```
//! use feud_core::engine::FeudEngine;
//! use feud_core::pack::{Answer, QuestionPack, Round};
//! use feud_core::round::FaceoffChoice;
//! use feud_core::session::GameSession;
//! use feud_core::settings::Settings;
//! use feud_core::team::TeamId;
//!
//! let pack = QuestionPack::new("Demo", vec![Round::new(
//!     "pets",
//!     "Name a popular pet",
//!     vec![Answer::new("Dog", 45), Answer::new("Cat", 35), Answer::new("Fish", 20)],
//! )]);
//!
//! let mut game = GameSession::new();
//! game.start_game_seeded(Settings::default(), pack, 42);
//! game.faceoff_correct(TeamId::A, 0);
//! game.faceoff_strike(TeamId::B);
//! game.faceoff_decide(TeamId::A, FaceoffChoice::Play);
//! game.reveal(1);
//! game.reveal(2);
//!
//! assert_eq!(game.score(TeamId::A), 100);
//! ```

pub mod engine;
pub mod event;
pub mod history;
pub mod host;
pub mod matcher;
pub mod pack;
pub mod round;
pub mod session;
pub mod settings;
pub mod store;
pub mod team;

pub use engine::FeudEngine;
pub use event::{EventLog, EventSink, GameEvent};
pub use host::Host;
pub use session::{apply_action, Action, GamePhase, GameSession, SessionError};
pub use team::TeamId;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
