//! Cross-round session state and the total transition function.
//!
//! A [`GameSession`] is a plain value. [`GameSession::apply`] consumes it
//! together with an [`Action`] and returns the next value plus the events the
//! transition produced. Rejected actions hand the input back untouched, so
//! callers never see a partially applied transition.

use crate::event::GameEvent;
use crate::history::{GameSnapshot, History};
use crate::matcher::{self, Candidate, MatchResult};
use crate::pack::{Answer, QuestionPack, Round};
use crate::round::{ActionError, FaceoffChoice, RoundOutcome, RoundPhase, RoundState};
use crate::settings::{Settings, SettingsError};
use crate::team::{TeamId, Teams};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum GamePhase {
    Setup,
    Playing,
    GameOver,
}

/// Every operation a host can request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Action {
    /// Begin a game. `seed` drives the one-time shuffle of the pack.
    StartGame { settings: Settings, pack: QuestionPack, seed: u64 },
    FaceoffSetBuzzer { team: TeamId },
    FaceoffCorrect { team: TeamId, answer_index: usize },
    FaceoffStrike { team: TeamId },
    FaceoffPickWinner { team: TeamId },
    FaceoffDecide { team: TeamId, choice: FaceoffChoice },
    RevealAnswer { answer_index: usize },
    AddStrike,
    RemoveStrike,
    EnterStealMode,
    SetStealGuess { guess: String },
    ResolveSteal { success: bool, match_index: Option<usize> },
    EndRound { winning_team: TeamId },
    NextRound,
    SkipRound,
    RevealAll,
    Undo,
    AdjustScore { team: TeamId, amount: i64 },
    SetScore { team: TeamId, score: i64 },
    RestartGame,
    ResetAll,
}

impl Action {
    /// Description stored with the undo snapshot and used in logs.
    pub fn label(&self) -> String {
        match self {
            Action::StartGame { .. } => "Game started".into(),
            Action::FaceoffSetBuzzer { team } => format!("Faceoff: Team {team} buzzed in"),
            Action::FaceoffCorrect { team, answer_index } => {
                format!("Faceoff: Team {team} got answer {}", answer_index + 1)
            }
            Action::FaceoffStrike { team } => format!("Faceoff: Team {team} got a strike"),
            Action::FaceoffPickWinner { team } => format!("Faceoff: Team {team} declared winner"),
            Action::FaceoffDecide { team, choice } => {
                let verb = match choice {
                    FaceoffChoice::Play => "play",
                    FaceoffChoice::Pass => "pass",
                };
                format!("Team {team} chose to {verb}")
            }
            Action::RevealAnswer { answer_index } => {
                format!("Revealed answer {}", answer_index + 1)
            }
            Action::AddStrike => "Strike added".into(),
            Action::RemoveStrike => "Strike removed".into(),
            Action::EnterStealMode => "Entered steal mode".into(),
            Action::SetStealGuess { .. } => "Steal guess entered".into(),
            Action::ResolveSteal { .. } => "Steal resolved".into(),
            Action::EndRound { winning_team } => format!("Round ended for Team {winning_team}"),
            Action::NextRound => "Next round".into(),
            Action::SkipRound => "Round skipped".into(),
            Action::RevealAll => "All answers revealed".into(),
            Action::Undo => "Undo".into(),
            Action::AdjustScore { team, amount } => format!("Team {team} score {amount:+}"),
            Action::SetScore { team, score } => format!("Team {team} score set to {score}"),
            Action::RestartGame => "Game restarted".into(),
            Action::ResetAll => "Reset".into(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Round(#[from] ActionError),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("question pack has no rounds")]
    EmptyPack,
    #[error("no question pack loaded")]
    NoPack,
    #[error("game is not in progress")]
    NotPlaying,
    #[error("no round in progress")]
    NoRound,
    #[error("nothing to undo")]
    EmptyHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) phase: GamePhase,
    pub(crate) settings: Settings,
    pub(crate) teams: Teams,
    pub(crate) pack: Option<QuestionPack>,
    pub(crate) round_index: usize,
    pub(crate) current_round: Option<RoundState>,
    pub(crate) history: History,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// State-passing form of [`GameSession::apply`] for callers that ignore events.
pub fn apply_action(session: GameSession, action: Action) -> GameSession {
    session.apply(action).0
}

impl GameSession {
    /// A session waiting in setup with default settings.
    pub fn new() -> Self {
        let settings = Settings::default();
        Self {
            phase: GamePhase::Setup,
            teams: Teams::new(settings.team_a_name.clone(), settings.team_b_name.clone()),
            history: History::new(settings.history_limit),
            settings,
            pack: None,
            round_index: 0,
            current_round: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn teams(&self) -> &Teams {
        &self.teams
    }

    pub fn score(&self, team: TeamId) -> u64 {
        self.teams[team].score
    }

    pub fn pack(&self) -> Option<&QuestionPack> {
        self.pack.as_ref()
    }

    pub fn round_index(&self) -> usize {
        self.round_index
    }

    pub fn current_round(&self) -> Option<&RoundState> {
        self.current_round.as_ref()
    }

    /// The question being played, if any.
    pub fn current_question(&self) -> Option<&Round> {
        self.current_round.as_ref()?;
        self.pack.as_ref()?.round(self.round_index)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Rounds that will be played: the configured count capped by the pack.
    pub fn rounds_to_play(&self) -> usize {
        self.pack.as_ref().map_or(0, |p| self.settings.rounds_to_play(p.len()))
    }

    /// Ranked candidate answers for a free-text guess on the current board.
    pub fn suggest_matches(&self, guess: &str) -> Vec<Candidate> {
        match (self.current_question(), self.current_round.as_ref()) {
            (Some(q), Some(r)) => matcher::rank_candidates(
                guess,
                q.answers(),
                r.revealed(),
                matcher::DEFAULT_MIN_CONFIDENCE,
            ),
            _ => Vec::new(),
        }
    }

    /// Best unrevealed answer for `guess`, offered as a suggestion only.
    pub fn best_match(&self, guess: &str) -> Option<MatchResult> {
        let q = self.current_question()?;
        let r = self.current_round.as_ref()?;
        Some(matcher::find_best_match(
            guess,
            q.answers(),
            r.revealed(),
            matcher::DEFAULT_MATCH_THRESHOLD,
        ))
    }

    /// Apply `action`, returning the next session and the events it emitted.
    /// Invalid or out-of-phase actions return `self` unchanged and no events.
    pub fn apply(self, action: Action) -> (GameSession, Vec<GameEvent>) {
        let label = action.label();
        match self.try_apply(action) {
            Ok(step) => step,
            Err(err) => {
                trace!(action = %label, %err, "action rejected");
                (self, Vec::new())
            }
        }
    }

    /// Like [`apply`](Self::apply) but reports why an action was rejected.
    pub fn try_apply(&self, action: Action) -> Result<(GameSession, Vec<GameEvent>), SessionError> {
        let label = action.label();
        let mut next = self.clone();
        let events = next.step(action)?;
        debug!(
            action = %label,
            round = next.round_index,
            phase = ?next.phase,
            round_phase = ?next.current_round.as_ref().map(RoundState::phase),
            events = events.len(),
            "action applied"
        );
        Ok((next, events))
    }

    fn step(&mut self, action: Action) -> Result<Vec<GameEvent>, SessionError> {
        let label = action.label();
        match action {
            Action::StartGame { settings, pack, seed } => self.begin_game(settings, pack, seed),
            Action::FaceoffSetBuzzer { team } => {
                self.round_mut()?.set_buzzer(team)?;
                Ok(Vec::new())
            }
            Action::FaceoffCorrect { team, answer_index } => {
                self.tracked(label, |r, answers, _| r.faceoff_correct(team, answer_index, answers))
            }
            Action::FaceoffStrike { team } => {
                self.tracked(label, |r, answers, _| r.faceoff_strike(team, answers))
            }
            Action::FaceoffPickWinner { team } => {
                self.tracked(label, |r, _, _| r.pick_faceoff_winner(team))
            }
            Action::FaceoffDecide { team, choice } => {
                self.tracked(label, |r, _, _| r.faceoff_decide(team, choice))
            }
            Action::RevealAnswer { answer_index } => {
                self.tracked(label, |r, answers, _| r.reveal(answer_index, answers))
            }
            Action::AddStrike => self.tracked(label, |r, _, limit| r.add_strike(limit)),
            Action::RemoveStrike => self.tracked(label, |r, _, _| r.remove_strike()),
            Action::EnterStealMode => self.tracked(label, |r, _, limit| r.enter_steal(limit)),
            Action::SetStealGuess { guess } => {
                self.round_mut()?.set_steal_guess(guess)?;
                Ok(Vec::new())
            }
            Action::ResolveSteal { success, match_index } => self.tracked(label, |r, answers, _| {
                r.resolve_steal(success, match_index, answers)
            }),
            Action::EndRound { winning_team } => {
                self.tracked(label, |r, _, _| r.end_round(winning_team))
            }
            Action::RevealAll => self.tracked(label, |r, answers, _| r.reveal_all(answers)),
            Action::NextRound => {
                let phase = self.round_mut()?.phase();
                if phase != RoundPhase::Ended {
                    return Err(ActionError::WrongPhase(phase).into());
                }
                self.advance()
            }
            Action::SkipRound => {
                self.ensure_playing()?;
                self.advance()
            }
            Action::Undo => self.restore_latest(),
            // Administrative corrections: not recorded for undo.
            Action::AdjustScore { team, amount } => {
                self.teams[team].adjust(amount);
                Ok(Vec::new())
            }
            Action::SetScore { team, score } => {
                self.teams[team].set(score);
                Ok(Vec::new())
            }
            Action::RestartGame => self.restart_from_top(),
            Action::ResetAll => {
                *self = GameSession::new();
                info!("session reset");
                Ok(Vec::new())
            }
        }
    }

    fn ensure_playing(&self) -> Result<(), SessionError> {
        if self.phase != GamePhase::Playing {
            return Err(SessionError::NotPlaying);
        }
        Ok(())
    }

    fn round_mut(&mut self) -> Result<&mut RoundState, SessionError> {
        self.ensure_playing()?;
        self.current_round.as_mut().ok_or(SessionError::NoRound)
    }

    fn snapshot(&self, label: String) -> GameSnapshot {
        GameSnapshot {
            teams: self.teams.clone(),
            round_index: self.round_index,
            round: self.current_round.clone(),
            label,
            timestamp: Utc::now(),
        }
    }

    /// Run an undoable round transition: snapshot, mutate, settle.
    fn tracked<F>(&mut self, label: String, f: F) -> Result<Vec<GameEvent>, SessionError>
    where
        F: FnOnce(&mut RoundState, &[Answer], u32) -> Result<RoundOutcome, ActionError>,
    {
        self.ensure_playing()?;
        let snapshot = self.snapshot(label);
        let limit = self.settings.strike_limit;
        let round = self.current_round.as_mut().ok_or(SessionError::NoRound)?;
        let pack = self.pack.as_ref().ok_or(SessionError::NoPack)?;
        let answers =
            pack.round(self.round_index).map(Round::answers).ok_or(SessionError::NoRound)?;

        let outcome = f(round, answers, limit)?;
        if let Some(s) = outcome.settlement {
            self.teams[s.team].credit(s.points);
            info!(team = %s.team, points = s.points, round = self.round_index, "round settled");
        }
        self.history.push(snapshot);
        Ok(outcome.events)
    }

    fn fresh_round(&self, index: usize) -> Result<RoundState, SessionError> {
        let pack = self.pack.as_ref().ok_or(SessionError::NoPack)?;
        let round = pack.round(index).ok_or(SessionError::NoRound)?;
        Ok(RoundState::new(index, self.settings.multiplier_for(index), round.answers().len()))
    }

    fn begin_round(&mut self, index: usize) -> Result<Vec<GameEvent>, SessionError> {
        let round = self.fresh_round(index)?;
        let multiplier = round.multiplier();
        self.round_index = index;
        self.current_round = Some(round);
        self.history.clear();
        info!(round = index, multiplier, "round started");
        Ok(vec![GameEvent::RoundStarted { round_index: index, multiplier }])
    }

    fn begin_game(
        &mut self,
        settings: Settings,
        mut pack: QuestionPack,
        seed: u64,
    ) -> Result<Vec<GameEvent>, SessionError> {
        settings.validate()?;
        if pack.is_empty() {
            return Err(SessionError::EmptyPack);
        }
        pack.shuffle_seeded(seed);
        info!(
            title = %pack.title(),
            rounds = settings.rounds_to_play(pack.len()),
            "game started"
        );
        self.teams = Teams::new(settings.team_a_name.clone(), settings.team_b_name.clone());
        self.history = History::new(settings.history_limit);
        self.settings = settings;
        self.pack = Some(pack);
        self.phase = GamePhase::Playing;
        self.begin_round(0)
    }

    fn advance(&mut self) -> Result<Vec<GameEvent>, SessionError> {
        let next = self.round_index + 1;
        if next >= self.rounds_to_play() {
            self.phase = GamePhase::GameOver;
            self.current_round = None;
            self.history.clear();
            let winner = self.teams.leader();
            info!(
                winner = ?winner,
                a = self.teams[TeamId::A].score,
                b = self.teams[TeamId::B].score,
                "game over"
            );
            return Ok(vec![GameEvent::GameOver { winner }]);
        }
        self.begin_round(next)
    }

    fn restore_latest(&mut self) -> Result<Vec<GameEvent>, SessionError> {
        let snapshot = self.history.pop().ok_or(SessionError::EmptyHistory)?;
        debug!(label = %snapshot.label, "undo");
        self.teams = snapshot.teams;
        self.round_index = snapshot.round_index;
        self.current_round = snapshot.round;
        Ok(Vec::new())
    }

    fn restart_from_top(&mut self) -> Result<Vec<GameEvent>, SessionError> {
        if self.pack.is_none() {
            return Err(SessionError::NoPack);
        }
        self.phase = GamePhase::Playing;
        self.teams.reset_scores();
        self.begin_round(0)
    }
}
