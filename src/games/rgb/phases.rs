//! Session phases and policy.
//!
//! A session is either still accepting guesses or has been revealed. The
//! score lives inside the `Revealed` variant, so a revealed session always
//! has one and a guessing session never does.

use super::score::Score;
use serde::{Deserialize, Serialize};

/// Phase of a guess session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum SessionPhase {
    /// The player is still adjusting the guess.
    Guessing,
    /// The score has been computed and frozen.
    Revealed {
        /// Score computed at reveal time.
        score: Score,
    },
}

impl SessionPhase {
    /// Returns the frozen score, if revealed.
    pub fn score(&self) -> Option<Score> {
        match self {
            SessionPhase::Guessing => None,
            SessionPhase::Revealed { score } => Some(*score),
        }
    }

    /// Returns true once the session has been revealed.
    pub fn is_revealed(&self) -> bool {
        matches!(self, SessionPhase::Revealed { .. })
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Guessing => write!(f, "Guessing"),
            SessionPhase::Revealed { score } => write!(f, "Revealed (score {})", score),
        }
    }
}

/// What to do with a channel value outside `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelPolicy {
    /// Clamp into range.
    #[default]
    Clamp,
    /// Fail with `InvalidChannelValue`.
    Reject,
}

/// Rules a session applies to guess edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPolicy {
    /// Handling of out-of-range channel values. NaN is always rejected.
    pub channel_policy: ChannelPolicy,
    /// Refuse guess edits once revealed.
    pub lock_after_reveal: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            channel_policy: ChannelPolicy::Clamp,
            lock_after_reveal: true,
        }
    }
}
