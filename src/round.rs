//! Single-round state machine: face-off, play, steal, ended.
//!
//! A [`RoundState`] never touches team scores. Transitions that settle the
//! round return a [`Settlement`] inside their [`RoundOutcome`] and the
//! session credits it. Every transition validates before it mutates, so a
//! rejected call leaves the state exactly as it was.

use crate::event::GameEvent;
use crate::pack::Answer;
use crate::team::TeamId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RoundPhase {
    Faceoff,
    Play,
    Steal,
    Ended,
}

impl RoundPhase {
    pub fn label(self) -> &'static str {
        match self {
            RoundPhase::Faceoff => "faceoff",
            RoundPhase::Play => "play",
            RoundPhase::Steal => "steal",
            RoundPhase::Ended => "ended",
        }
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whose turn it is during the face-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceoffTurn {
    Team(TeamId),
    /// Both teams have had their turn; the winner chooses to play or pass.
    Decide,
}

impl fmt::Display for FaceoffTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceoffTurn::Team(t) => write!(f, "team {t}"),
            FaceoffTurn::Decide => f.write_str("decide"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceoffChoice {
    Play,
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StealResult {
    Success,
    Failed,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("not allowed during the {0} phase")]
    WrongPhase(RoundPhase),
    #[error("team {team} cannot act, current face-off turn: {turn}")]
    NotYourTurn { team: TeamId, turn: FaceoffTurn },
    #[error("face-off already underway")]
    FaceoffUnderway,
    #[error("face-off has no winner yet")]
    NoFaceoffWinner,
    #[error("team {team} did not win the face-off (winner: {winner})")]
    NotFaceoffWinner { team: TeamId, winner: TeamId },
    #[error("answer index out of range: len {len}, got {index}")]
    AnswerOutOfRange { index: usize, len: usize },
    #[error("answer {0} already revealed")]
    AlreadyRevealed(usize),
    #[error("strike limit of {0} already reached")]
    StrikeLimitReached(u32),
    #[error("no strikes to remove")]
    NoStrikes,
    #[error("no controlling team")]
    NoController,
    #[error("face-off winner can only be picked after both teams struck")]
    NoDeadlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faceoff {
    pub(crate) current_turn: FaceoffTurn,
    pub(crate) team_a_answer: Option<usize>,
    pub(crate) team_b_answer: Option<usize>,
    pub(crate) team_a_strike: bool,
    pub(crate) team_b_strike: bool,
    pub(crate) winner: Option<TeamId>,
}

impl Default for Faceoff {
    fn default() -> Self {
        Self {
            current_turn: FaceoffTurn::Team(TeamId::A),
            team_a_answer: None,
            team_b_answer: None,
            team_a_strike: false,
            team_b_strike: false,
            winner: None,
        }
    }
}

impl Faceoff {
    pub fn current_turn(&self) -> FaceoffTurn {
        self.current_turn
    }

    /// Index of the answer `team` matched, if any.
    pub fn answer(&self, team: TeamId) -> Option<usize> {
        match team {
            TeamId::A => self.team_a_answer,
            TeamId::B => self.team_b_answer,
        }
    }

    pub fn struck(&self, team: TeamId) -> bool {
        match team {
            TeamId::A => self.team_a_strike,
            TeamId::B => self.team_b_strike,
        }
    }

    pub fn has_acted(&self, team: TeamId) -> bool {
        self.answer(team).is_some() || self.struck(team)
    }

    pub fn winner(&self) -> Option<TeamId> {
        self.winner
    }

    fn set_answer(&mut self, team: TeamId, index: usize) {
        match team {
            TeamId::A => self.team_a_answer = Some(index),
            TeamId::B => self.team_b_answer = Some(index),
        }
    }

    fn set_strike(&mut self, team: TeamId) {
        match team {
            TeamId::A => self.team_a_strike = true,
            TeamId::B => self.team_b_strike = true,
        }
    }

    /// Winner once both teams have acted; `last` just resolved the pair.
    fn resolve(&self, last: TeamId, answers: &[Answer]) -> Option<TeamId> {
        let points = |t: TeamId| self.answer(t).and_then(|i| answers.get(i)).map(|a| a.points);
        match (points(TeamId::A), points(TeamId::B)) {
            (Some(a), Some(b)) if a > b => Some(TeamId::A),
            (Some(a), Some(b)) if b > a => Some(TeamId::B),
            (Some(_), Some(_)) => Some(last),
            (Some(_), None) => Some(TeamId::A),
            (None, Some(_)) => Some(TeamId::B),
            (None, None) => None,
        }
    }
}

/// Points owed to a team when a round settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub team: TeamId,
    pub points: u64,
}

/// What an accepted round transition produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    pub events: Vec<GameEvent>,
    pub settlement: Option<Settlement>,
}

impl RoundOutcome {
    fn with(events: Vec<GameEvent>) -> Self {
        Self { events, settlement: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub(crate) round_index: usize,
    pub(crate) revealed: Vec<bool>,
    pub(crate) strikes: u32,
    pub(crate) controller: Option<TeamId>,
    pub(crate) phase: RoundPhase,
    pub(crate) round_pot: u64,
    pub(crate) multiplier: u64,
    pub(crate) faceoff: Faceoff,
    pub(crate) steal_guess: Option<String>,
    pub(crate) steal_result: Option<StealResult>,
}

impl RoundState {
    /// A fresh face-off with every answer hidden.
    pub fn new(round_index: usize, multiplier: u64, answer_count: usize) -> Self {
        Self {
            round_index,
            revealed: vec![false; answer_count],
            strikes: 0,
            controller: None,
            phase: RoundPhase::Faceoff,
            round_pot: 0,
            multiplier,
            faceoff: Faceoff::default(),
            steal_guess: None,
            steal_result: None,
        }
    }

    pub fn round_index(&self) -> usize {
        self.round_index
    }

    pub fn revealed(&self) -> &[bool] {
        &self.revealed
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(|&r| r)
    }

    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    pub fn controller(&self) -> Option<TeamId> {
        self.controller
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Points revealed so far, before the multiplier.
    pub fn pot(&self) -> u64 {
        self.round_pot
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    pub fn faceoff(&self) -> &Faceoff {
        &self.faceoff
    }

    pub fn steal_guess(&self) -> Option<&str> {
        self.steal_guess.as_deref()
    }

    pub fn steal_result(&self) -> Option<StealResult> {
        self.steal_result
    }

    /// What settling right now would pay out.
    pub fn settlement_value(&self) -> u64 {
        self.round_pot.saturating_mul(self.multiplier)
    }

    /// Sum of the points of every revealed answer.
    pub fn revealed_points(&self, answers: &[Answer]) -> u64 {
        answers.iter().zip(&self.revealed).filter(|(_, r)| **r).map(|(a, _)| a.points).sum()
    }

    fn ensure_phase(&self, allowed: &[RoundPhase]) -> Result<(), ActionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(ActionError::WrongPhase(self.phase))
        }
    }

    fn ensure_open(&self) -> Result<(), ActionError> {
        if matches!(self.phase, RoundPhase::Ended) {
            return Err(ActionError::WrongPhase(self.phase));
        }
        Ok(())
    }

    fn ensure_hidden(&self, index: usize, answers: &[Answer]) -> Result<(), ActionError> {
        let len = answers.len().min(self.revealed.len());
        if index >= len {
            return Err(ActionError::AnswerOutOfRange { index, len });
        }
        if self.revealed[index] {
            return Err(ActionError::AlreadyRevealed(index));
        }
        Ok(())
    }

    fn ensure_faceoff_turn(&self, team: TeamId) -> Result<(), ActionError> {
        self.ensure_phase(&[RoundPhase::Faceoff])?;
        let turn = self.faceoff.current_turn;
        if turn != FaceoffTurn::Team(team) || self.faceoff.has_acted(team) {
            return Err(ActionError::NotYourTurn { team, turn });
        }
        Ok(())
    }

    fn reveal_unchecked(&mut self, index: usize, answers: &[Answer]) -> GameEvent {
        let points = answers[index].points;
        self.revealed[index] = true;
        self.round_pot += points;
        GameEvent::Reveal { index, points }
    }

    fn reveal_everything(&mut self) {
        self.revealed.iter_mut().for_each(|r| *r = true);
    }

    fn settle(&mut self, team: TeamId, events: &mut Vec<GameEvent>) -> Settlement {
        self.phase = RoundPhase::Ended;
        let points = self.settlement_value();
        events.push(GameEvent::RoundWon { team, points });
        Settlement { team, points }
    }

    /// Hand the opening turn to whichever team buzzed in first.
    pub fn set_buzzer(&mut self, team: TeamId) -> Result<(), ActionError> {
        self.ensure_phase(&[RoundPhase::Faceoff])?;
        let f = &self.faceoff;
        if f.has_acted(TeamId::A) || f.has_acted(TeamId::B) || f.winner.is_some() {
            return Err(ActionError::FaceoffUnderway);
        }
        self.faceoff.current_turn = FaceoffTurn::Team(team);
        Ok(())
    }

    /// `team` named the answer at `index` during its face-off turn.
    pub fn faceoff_correct(
        &mut self,
        team: TeamId,
        index: usize,
        answers: &[Answer],
    ) -> Result<RoundOutcome, ActionError> {
        self.ensure_faceoff_turn(team)?;
        self.ensure_hidden(index, answers)?;
        let mut events = vec![self.reveal_unchecked(index, answers)];
        self.faceoff.set_answer(team, index);
        events.extend(self.finish_faceoff_turn(team, answers));
        Ok(RoundOutcome::with(events))
    }

    /// `team` missed during its face-off turn.
    pub fn faceoff_strike(
        &mut self,
        team: TeamId,
        answers: &[Answer],
    ) -> Result<RoundOutcome, ActionError> {
        self.ensure_faceoff_turn(team)?;
        self.faceoff.set_strike(team);
        let mut events = vec![GameEvent::FaceoffStrike { team }];
        events.extend(self.finish_faceoff_turn(team, answers));
        Ok(RoundOutcome::with(events))
    }

    fn finish_faceoff_turn(&mut self, team: TeamId, answers: &[Answer]) -> Option<GameEvent> {
        let f = &mut self.faceoff;
        if !f.has_acted(team.other()) {
            f.current_turn = FaceoffTurn::Team(team.other());
            return None;
        }
        f.current_turn = FaceoffTurn::Decide;
        // Double strike leaves the winner for the host to pick.
        f.winner = f.resolve(team, answers);
        f.winner.map(|team| GameEvent::FaceoffWinner { team })
    }

    /// Host ruling after a double strike, the only face-off with no computed winner.
    pub fn pick_faceoff_winner(&mut self, team: TeamId) -> Result<RoundOutcome, ActionError> {
        self.ensure_phase(&[RoundPhase::Faceoff])?;
        if self.faceoff.current_turn != FaceoffTurn::Decide || self.faceoff.winner.is_some() {
            return Err(ActionError::NoDeadlock);
        }
        self.faceoff.winner = Some(team);
        Ok(RoundOutcome::with(vec![GameEvent::FaceoffWinner { team }]))
    }

    /// The face-off winner plays the board or passes it to the other team.
    pub fn faceoff_decide(
        &mut self,
        team: TeamId,
        choice: FaceoffChoice,
    ) -> Result<RoundOutcome, ActionError> {
        self.ensure_phase(&[RoundPhase::Faceoff])?;
        let winner = self.faceoff.winner.ok_or(ActionError::NoFaceoffWinner)?;
        if winner != team {
            return Err(ActionError::NotFaceoffWinner { team, winner });
        }
        let controller = match choice {
            FaceoffChoice::Play => team,
            FaceoffChoice::Pass => team.other(),
        };
        self.controller = Some(controller);
        self.phase = RoundPhase::Play;
        Ok(RoundOutcome::with(vec![GameEvent::FaceoffDecided { team, choice, controller }]))
    }

    /// Reveal one answer for the controlling team. Clearing the board
    /// settles the round in the controller's favour.
    pub fn reveal(
        &mut self,
        index: usize,
        answers: &[Answer],
    ) -> Result<RoundOutcome, ActionError> {
        self.ensure_phase(&[RoundPhase::Play])?;
        let controller = self.controller.ok_or(ActionError::NoController)?;
        self.ensure_hidden(index, answers)?;
        let mut events = vec![self.reveal_unchecked(index, answers)];
        let settlement =
            if self.all_revealed() { Some(self.settle(controller, &mut events)) } else { None };
        Ok(RoundOutcome { events, settlement })
    }

    pub fn add_strike(&mut self, limit: u32) -> Result<RoundOutcome, ActionError> {
        self.ensure_phase(&[RoundPhase::Play])?;
        if self.strikes >= limit {
            return Err(ActionError::StrikeLimitReached(limit));
        }
        self.strikes += 1;
        let mut events = vec![GameEvent::Strike { strikes: self.strikes }];
        if self.strikes >= limit {
            events.extend(self.open_steal());
        }
        Ok(RoundOutcome::with(events))
    }

    pub fn remove_strike(&mut self) -> Result<RoundOutcome, ActionError> {
        self.ensure_phase(&[RoundPhase::Play, RoundPhase::Steal])?;
        if self.strikes == 0 {
            return Err(ActionError::NoStrikes);
        }
        self.strikes -= 1;
        if matches!(self.phase, RoundPhase::Steal) {
            self.phase = RoundPhase::Play;
        }
        Ok(RoundOutcome::default())
    }

    /// Host-forced steal regardless of the current strike count.
    pub fn enter_steal(&mut self, limit: u32) -> Result<RoundOutcome, ActionError> {
        self.ensure_phase(&[RoundPhase::Play])?;
        self.strikes = limit;
        Ok(RoundOutcome::with(self.open_steal().into_iter().collect()))
    }

    fn open_steal(&mut self) -> Option<GameEvent> {
        self.phase = RoundPhase::Steal;
        self.controller.map(|c| GameEvent::StealOpportunity { team: c.other() })
    }

    pub fn set_steal_guess(&mut self, guess: impl Into<String>) -> Result<(), ActionError> {
        self.ensure_phase(&[RoundPhase::Steal])?;
        self.steal_guess = Some(guess.into());
        Ok(())
    }

    /// Settle the steal attempt. A successful steal may name the matched
    /// answer, whose points join the pot before payout.
    pub fn resolve_steal(
        &mut self,
        success: bool,
        match_index: Option<usize>,
        answers: &[Answer],
    ) -> Result<RoundOutcome, ActionError> {
        self.ensure_phase(&[RoundPhase::Steal])?;
        let controller = self.controller.ok_or(ActionError::NoController)?;
        let stealer = controller.other();
        let matched = match_index.filter(|_| success);
        if let Some(index) = matched {
            self.ensure_hidden(index, answers)?;
        }

        let mut events = Vec::new();
        if let Some(index) = matched {
            events.push(self.reveal_unchecked(index, answers));
        }
        let winner = if success {
            events.push(GameEvent::StealSucceeded { team: stealer });
            self.steal_result = Some(StealResult::Success);
            stealer
        } else {
            events.push(GameEvent::StealFailed { team: stealer });
            self.steal_result = Some(StealResult::Failed);
            controller
        };
        self.reveal_everything();
        let settlement = self.settle(winner, &mut events);
        Ok(RoundOutcome { events, settlement: Some(settlement) })
    }

    /// Host override: settle now in favour of `team`.
    pub fn end_round(&mut self, team: TeamId) -> Result<RoundOutcome, ActionError> {
        self.ensure_open()?;
        self.reveal_everything();
        if self.controller.is_none() {
            self.controller = Some(team);
        }
        let mut events = Vec::new();
        let settlement = self.settle(team, &mut events);
        Ok(RoundOutcome { events, settlement: Some(settlement) })
    }

    /// Show the whole board; the pot becomes the board total. Does not settle.
    pub fn reveal_all(&mut self, answers: &[Answer]) -> Result<RoundOutcome, ActionError> {
        self.ensure_open()?;
        self.reveal_everything();
        self.round_pot = answers.iter().map(|a| a.points).sum();
        Ok(RoundOutcome::with(vec![GameEvent::BoardRevealed]))
    }
}
