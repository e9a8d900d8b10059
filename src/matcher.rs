//! Fuzzy matching of a spoken guess against the answers on the board.
//!
//! Everything here is a pure function of its inputs. Results are only ever
//! suggestions for the host; revealing an answer stays an explicit action.
//!
//! ```
//! use feud_core::matcher::{find_best_match, similarity, DEFAULT_MATCH_THRESHOLD};
//! use feud_core::pack::Answer;
//!
//! assert!(similarity("Dog", "dogs") >= DEFAULT_MATCH_THRESHOLD);
//!
//! let answers = vec![Answer::new("Dog", 40), Answer::new("Cat", 30).with_aliases(["kitty"])];
//! let m = find_best_match("kitties", &answers, &[false, false], DEFAULT_MATCH_THRESHOLD);
//! assert_eq!(m.index, Some(1));
//! assert!(m.matched);
//! ```

use crate::pack::Answer;
use serde::{Deserialize, Serialize};

/// Confidence at which a best match is reported as `matched`.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.7;
/// Lowest confidence still offered to the host as a candidate.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

const ARTICLES: [&str; 3] = ["a", "an", "the"];

/// A ranked candidate for a guess.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub index: usize,
    pub confidence: f64,
}

/// Outcome of [`find_best_match`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Best unrevealed answer, `None` when nothing scored above zero.
    pub index: Option<usize>,
    pub confidence: f64,
    /// Whether `confidence` reached the requested threshold.
    pub matched: bool,
}

impl MatchResult {
    const NONE: MatchResult = MatchResult { index: None, confidence: 0.0, matched: false };
}

/// Lower-case, drop punctuation, collapse whitespace and a leading article.
///
/// ```
/// use feud_core::matcher::normalize;
///
/// assert_eq!(normalize("  The  Big   APPLE! "), "big apple");
/// assert_eq!(normalize("a DOG!"), "dog");
/// assert_eq!(normalize("The"), "the");
/// ```
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    let mut words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.len() > 1 && ARTICLES.contains(&words[0]) {
        words.remove(0);
    }
    words.join(" ")
}

/// Unit-cost insert/delete/substitute edit distance over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Similarity in `[0, 1]` between two raw strings.
///
/// Both sides go through [`normalize`] first, so a leading article does not
/// count against the score: `similarity("a DOG!", "dog")` is `1.0`, where a
/// plain edit distance over the lower-cased text would give `0.6`.
///
/// ```
/// use feud_core::matcher::{levenshtein, similarity};
///
/// assert_eq!(similarity("The Dog", "dog"), 1.0);
/// assert_eq!(levenshtein("the dog", "dog"), 4);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_normalized(&normalize(a), &normalize(b))
}

fn similarity_normalized(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Best similarity between a normalized guess and an answer or any alias.
fn answer_confidence(guess: &str, answer: &Answer) -> f64 {
    answer
        .aliases
        .iter()
        .map(|alias| similarity_normalized(guess, &normalize(alias)))
        .fold(similarity_normalized(guess, &normalize(&answer.text)), f64::max)
}

fn unrevealed<'a>(
    answers: &'a [Answer],
    revealed: &'a [bool],
) -> impl Iterator<Item = (usize, &'a Answer)> + 'a {
    answers
        .iter()
        .enumerate()
        .filter(move |(i, _)| !revealed.get(*i).copied().unwrap_or(false))
}

/// Unrevealed answers scoring at least `min_confidence`, best first.
pub fn rank_candidates(
    guess: &str,
    answers: &[Answer],
    revealed: &[bool],
    min_confidence: f64,
) -> Vec<Candidate> {
    let guess = normalize(guess);
    let mut out: Vec<Candidate> = unrevealed(answers, revealed)
        .map(|(index, answer)| Candidate { index, confidence: answer_confidence(&guess, answer) })
        .filter(|c| c.confidence >= min_confidence)
        .collect();
    // Stable: equal confidences keep board order.
    out.sort_by(|x, y| y.confidence.total_cmp(&x.confidence));
    out
}

/// Single best unrevealed answer for `guess`; earlier answers win ties.
pub fn find_best_match(
    guess: &str,
    answers: &[Answer],
    revealed: &[bool],
    threshold: f64,
) -> MatchResult {
    let guess = normalize(guess);
    let mut best = MatchResult::NONE;
    for (index, answer) in unrevealed(answers, revealed) {
        let confidence = answer_confidence(&guess, answer);
        if confidence > best.confidence {
            best = MatchResult { index: Some(index), confidence, matched: confidence >= threshold };
        }
    }
    best
}
