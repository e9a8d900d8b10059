//! Game configuration supplied at setup.

use serde::{Deserialize, Serialize};

/// Default number of snapshots kept for undo.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("number of rounds must be at least 1")]
    NoRounds,
    #[error("strike limit must be at least 1")]
    NoStrikes,
    #[error("multiplier for round {round} must be at least 1")]
    ZeroMultiplier { round: usize },
    #[error("history limit must be at least 1")]
    NoHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game_title: String,
    pub team_a_name: String,
    pub team_b_name: String,
    pub number_of_rounds: usize,
    pub strike_limit: u32,
    /// Per-round score multipliers; rounds past the end of the list use 1.
    pub multipliers: Vec<u64>,
    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_title: "Family Feud Night".into(),
            team_a_name: "Team A".into(),
            team_b_name: "Team B".into(),
            number_of_rounds: 5,
            strike_limit: 3,
            multipliers: vec![1, 1, 2, 2, 3],
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.number_of_rounds == 0 {
            return Err(SettingsError::NoRounds);
        }
        if self.strike_limit == 0 {
            return Err(SettingsError::NoStrikes);
        }
        if let Some(round) = self.multipliers.iter().position(|&m| m == 0) {
            return Err(SettingsError::ZeroMultiplier { round });
        }
        if self.history_limit == 0 {
            return Err(SettingsError::NoHistory);
        }
        Ok(())
    }

    /// Multiplier scheduled for the zero-based `round`.
    pub fn multiplier_for(&self, round: usize) -> u64 {
        self.multipliers.get(round).copied().unwrap_or(1)
    }

    /// Rounds actually played given how many the pack holds.
    pub fn rounds_to_play(&self, pack_len: usize) -> usize {
        self.number_of_rounds.min(pack_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_zero_values() {
        let s = Settings { number_of_rounds: 0, ..Settings::default() };
        assert_eq!(s.validate(), Err(SettingsError::NoRounds));

        let s = Settings { strike_limit: 0, ..Settings::default() };
        assert_eq!(s.validate(), Err(SettingsError::NoStrikes));

        let s = Settings { multipliers: vec![1, 0, 2], ..Settings::default() };
        assert_eq!(s.validate(), Err(SettingsError::ZeroMultiplier { round: 1 }));
    }

    #[test]
    fn multiplier_falls_back_to_one() {
        let s = Settings { multipliers: vec![2, 3], ..Settings::default() };
        assert_eq!(s.multiplier_for(0), 2);
        assert_eq!(s.multiplier_for(1), 3);
        assert_eq!(s.multiplier_for(2), 1);
    }

    #[test]
    fn rounds_to_play_is_capped_by_pack() {
        let s = Settings::default();
        assert_eq!(s.rounds_to_play(3), 3);
        assert_eq!(s.rounds_to_play(9), 5);
    }

    #[test]
    fn partial_blob_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"strike_limit":2}"#).unwrap();
        assert_eq!(s.strike_limit, 2);
        assert_eq!(s.number_of_rounds, 5);
        assert_eq!(s.history_limit, DEFAULT_HISTORY_LIMIT);
    }
}
