//! First-class invariants for guess sessions.
//!
//! Invariants are checked after every transition in debug builds.

use super::session::GameSession;
use tracing::error;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the session reports a score exactly when it is revealed.
pub struct ScoreIffRevealed;

impl Invariant<GameSession> for ScoreIffRevealed {
    fn holds(session: &GameSession) -> bool {
        session.revealed() == session.score().is_some()
    }

    fn description() -> &'static str {
        "Score must be present if and only if the session is revealed"
    }
}

/// Invariant: target and guess channels all lie in `[0, 1)`.
pub struct ChannelsInRange;

impl Invariant<GameSession> for ChannelsInRange {
    fn holds(session: &GameSession) -> bool {
        session.target().is_valid() && session.guess().is_valid()
    }

    fn description() -> &'static str {
        "Target and guess channels must lie in [0, 1)"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (ScoreIffRevealed, ChannelsInRange);

/// Panics in debug builds if any session invariant is violated.
pub(crate) fn assert_invariants(session: &GameSession) {
    if !cfg!(debug_assertions) {
        return;
    }
    if let Err(violations) = SessionInvariants::check_all(session) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        error!(%descriptions, "Session invariant violated");
        panic!("Session invariant violated: {}", descriptions);
    }
}
