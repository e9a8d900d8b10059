// Host-facing engine API boundary. This trait exposes every game action and the
// common board queries so front-ends (control panel, display, scripts) can drive
// a game without matching on `Action` themselves. It is implemented for the
// bare `GameSession` and for `Host`, which adds persistence and subscribers.

use crate::event::GameEvent;
use crate::matcher::Candidate;
use crate::pack::{QuestionPack, Round};
use crate::round::{FaceoffChoice, RoundPhase, RoundState};
use crate::session::{Action, GamePhase, GameSession};
use crate::settings::Settings;
use crate::team::TeamId;
use rand::Rng;

pub trait FeudEngine {
    /// Apply one action. Rejected actions change nothing and emit no events.
    fn dispatch(&mut self, action: Action) -> Vec<GameEvent>;
    fn session(&self) -> &GameSession;

    // Game lifecycle
    fn start_game(&mut self, settings: Settings, pack: QuestionPack) -> Vec<GameEvent> {
        let seed = rand::rng().random();
        self.start_game_seeded(settings, pack, seed)
    }
    fn start_game_seeded(
        &mut self,
        settings: Settings,
        pack: QuestionPack,
        seed: u64,
    ) -> Vec<GameEvent> {
        self.dispatch(Action::StartGame { settings, pack, seed })
    }
    fn next_round(&mut self) -> Vec<GameEvent> {
        self.dispatch(Action::NextRound)
    }
    fn skip_round(&mut self) -> Vec<GameEvent> {
        self.dispatch(Action::SkipRound)
    }
    fn restart_game(&mut self) -> Vec<GameEvent> {
        self.dispatch(Action::RestartGame)
    }
    fn reset_all(&mut self) -> Vec<GameEvent> {
        self.dispatch(Action::ResetAll)
    }
    fn undo(&mut self) -> Vec<GameEvent> {
        self.dispatch(Action::Undo)
    }

    // Face-off
    fn faceoff_buzzer(&mut self, team: TeamId) -> Vec<GameEvent> {
        self.dispatch(Action::FaceoffSetBuzzer { team })
    }
    fn faceoff_correct(&mut self, team: TeamId, answer_index: usize) -> Vec<GameEvent> {
        self.dispatch(Action::FaceoffCorrect { team, answer_index })
    }
    fn faceoff_strike(&mut self, team: TeamId) -> Vec<GameEvent> {
        self.dispatch(Action::FaceoffStrike { team })
    }
    fn faceoff_pick_winner(&mut self, team: TeamId) -> Vec<GameEvent> {
        self.dispatch(Action::FaceoffPickWinner { team })
    }
    fn faceoff_decide(&mut self, team: TeamId, choice: FaceoffChoice) -> Vec<GameEvent> {
        self.dispatch(Action::FaceoffDecide { team, choice })
    }

    // Board play
    fn reveal(&mut self, answer_index: usize) -> Vec<GameEvent> {
        self.dispatch(Action::RevealAnswer { answer_index })
    }
    fn add_strike(&mut self) -> Vec<GameEvent> {
        self.dispatch(Action::AddStrike)
    }
    fn remove_strike(&mut self) -> Vec<GameEvent> {
        self.dispatch(Action::RemoveStrike)
    }
    fn enter_steal(&mut self) -> Vec<GameEvent> {
        self.dispatch(Action::EnterStealMode)
    }
    fn set_steal_guess(&mut self, guess: impl Into<String>) -> Vec<GameEvent>
    where
        Self: Sized,
    {
        self.dispatch(Action::SetStealGuess { guess: guess.into() })
    }
    fn resolve_steal(&mut self, success: bool, match_index: Option<usize>) -> Vec<GameEvent> {
        self.dispatch(Action::ResolveSteal { success, match_index })
    }
    fn end_round(&mut self, winning_team: TeamId) -> Vec<GameEvent> {
        self.dispatch(Action::EndRound { winning_team })
    }
    fn reveal_all(&mut self) -> Vec<GameEvent> {
        self.dispatch(Action::RevealAll)
    }

    // Score corrections
    fn adjust_score(&mut self, team: TeamId, amount: i64) -> Vec<GameEvent> {
        self.dispatch(Action::AdjustScore { team, amount })
    }
    fn set_score(&mut self, team: TeamId, score: i64) -> Vec<GameEvent> {
        self.dispatch(Action::SetScore { team, score })
    }

    // Queries
    fn phase(&self) -> GamePhase {
        self.session().phase()
    }
    fn round_phase(&self) -> Option<RoundPhase> {
        self.session().current_round().map(RoundState::phase)
    }
    fn round(&self) -> Option<&RoundState> {
        self.session().current_round()
    }
    fn question(&self) -> Option<&Round> {
        self.session().current_question()
    }
    fn score(&self, team: TeamId) -> u64 {
        self.session().score(team)
    }
    fn suggest(&self, guess: &str) -> Vec<Candidate> {
        self.session().suggest_matches(guess)
    }
}

impl FeudEngine for GameSession {
    fn dispatch(&mut self, action: Action) -> Vec<GameEvent> {
        let (next, events) = std::mem::take(self).apply(action);
        *self = next;
        events
    }

    fn session(&self) -> &GameSession {
        self
    }
}
