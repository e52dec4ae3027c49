//! Similarity scoring between a guess and a target.
//!
//! Colors are treated as points in the unit cube. The score is
//! `(1 - distance) * 100` rounded half-up and is never clamped, so the
//! farthest possible guess (distance `sqrt(3)`) scores -73.

use super::types::Color;
use tracing::instrument;

/// Score for a single round. Ranges over `[-73, 100]`.
pub type Score = i32;

/// Score awarded for an exact match.
pub const PERFECT_SCORE: Score = 100;

/// Euclidean distance between two colors in RGB space.
pub fn distance(a: &Color, b: &Color) -> f64 {
    let dr = a.red() - b.red();
    let dg = a.green() - b.green();
    let db = a.blue() - b.blue();
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Computes the score for `guess` against `target`.
#[instrument(level = "debug", ret)]
pub fn compute_score(guess: &Color, target: &Color) -> Score {
    let scaled = (1.0 - distance(guess, target)) * 100.0;
    (scaled + 0.5).floor() as Score
}
