use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A ranked survey answer.
///
/// ```
/// use feud_core::pack::Answer;
///
/// let a = Answer::new("Dog", 42).with_aliases(["puppy", "hound"]);
/// assert_eq!(a.points(), 42);
/// assert_eq!(a.aliases().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub(crate) text: String,
    pub(crate) points: u64,
    #[serde(default)]
    pub(crate) aliases: Vec<String>,
}

impl Answer {
    pub fn new(text: impl Into<String>, points: u64) -> Self {
        Self { text: text.into(), points, aliases: Vec::new() }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

/// One question of the pack. Answers are ordered by points, highest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub(crate) id: String,
    pub(crate) question: String,
    pub(crate) answers: Vec<Answer>,
}

impl Round {
    pub fn new(id: impl Into<String>, question: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self { id: id.into(), question: question.into(), answers }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Sum of every answer on the board.
    pub fn total_points(&self) -> u64 {
        self.answers.iter().map(|a| a.points).sum()
    }
}

/// An already validated set of rounds handed over by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPack {
    pub(crate) title: String,
    pub(crate) rounds: Vec<Round>,
}

impl QuestionPack {
    pub fn new(title: impl Into<String>, rounds: Vec<Round>) -> Self {
        Self { title: title.into(), rounds }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Shuffle round order using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.rounds.shuffle(&mut rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(n: usize) -> QuestionPack {
        let rounds = (0..n)
            .map(|i| {
                Round::new(
                    format!("round-{}", i + 1),
                    format!("Question {i}"),
                    vec![Answer::new("x", 30), Answer::new("y", 20), Answer::new("z", 10)],
                )
            })
            .collect();
        QuestionPack::new("Test", rounds)
    }

    #[test]
    fn total_points_sums_board() {
        let p = pack(1);
        assert_eq!(p.rounds()[0].total_points(), 60);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut p1 = pack(12);
        let mut p2 = pack(12);
        p1.shuffle_seeded(42);
        p2.shuffle_seeded(42);
        assert_eq!(p1, p2);
    }

    #[test]
    fn shuffle_keeps_every_round() {
        let mut p = pack(12);
        p.shuffle_seeded(7);
        let mut ids: Vec<&str> = p.rounds().iter().map(Round::id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn aliases_default_when_missing() {
        let a: Answer = serde_json::from_str(r#"{"text":"Cat","points":12}"#).unwrap();
        assert!(a.aliases().is_empty());
    }
}
