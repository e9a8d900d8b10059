use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// One of the two competing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamId {
    A,
    B,
}

impl TeamId {
    pub const ALL: [TeamId; 2] = [TeamId::A, TeamId::B];

    /// The opposing team.
    pub const fn other(self) -> TeamId {
        match self {
            TeamId::A => TeamId::B,
            TeamId::B => TeamId::A,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            TeamId::A => 'A',
            TeamId::B => 'B',
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TeamParseError {
    #[error("invalid team: '{0}'")]
    Invalid(String),
}

impl FromStr for TeamId {
    type Err = TeamParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(TeamId::A),
            "B" => Ok(TeamId::B),
            _ => Err(TeamParseError::Invalid(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub(crate) id: TeamId,
    pub(crate) name: String,
    pub(crate) score: u64,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), score: 0 }
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the team's accumulated score
    pub fn score(&self) -> u64 {
        self.score
    }

    pub(crate) fn credit(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Shift the score by a signed amount, never dropping below zero.
    pub(crate) fn adjust(&mut self, amount: i64) {
        self.score = if amount < 0 {
            self.score.saturating_sub(amount.unsigned_abs())
        } else {
            self.score.saturating_add(amount as u64)
        };
    }

    pub(crate) fn set(&mut self, score: i64) {
        self.score = score.max(0) as u64;
    }
}

/// Both teams of a session, addressable by [`TeamId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teams {
    pub(crate) a: Team,
    pub(crate) b: Team,
}

impl Teams {
    pub fn new(a_name: impl Into<String>, b_name: impl Into<String>) -> Self {
        Self { a: Team::new(TeamId::A, a_name), b: Team::new(TeamId::B, b_name) }
    }

    pub fn get(&self, id: TeamId) -> &Team {
        match id {
            TeamId::A => &self.a,
            TeamId::B => &self.b,
        }
    }

    pub(crate) fn get_mut(&mut self, id: TeamId) -> &mut Team {
        match id {
            TeamId::A => &mut self.a,
            TeamId::B => &mut self.b,
        }
    }

    /// Team with the strictly higher score, `None` on a tie.
    pub fn leader(&self) -> Option<TeamId> {
        use std::cmp::Ordering;
        match self.a.score.cmp(&self.b.score) {
            Ordering::Greater => Some(TeamId::A),
            Ordering::Less => Some(TeamId::B),
            Ordering::Equal => None,
        }
    }

    pub(crate) fn reset_scores(&mut self) {
        self.a.score = 0;
        self.b.score = 0;
    }
}

impl Default for Teams {
    fn default() -> Self {
        Self::new("Team A", "Team B")
    }
}

impl Index<TeamId> for Teams {
    type Output = Team;

    fn index(&self, id: TeamId) -> &Team {
        self.get(id)
    }
}

impl IndexMut<TeamId> for Teams {
    fn index_mut(&mut self, id: TeamId) -> &mut Team {
        self.get_mut(id)
    }
}
