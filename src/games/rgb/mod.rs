mod error;
mod generator;
mod invariants;
mod phases;
mod score;
mod session;
mod types;

pub use error::SessionError;
pub use generator::{ColorSource, RandomColorGenerator};
pub use invariants::{
    ChannelsInRange, Invariant, InvariantSet, InvariantViolation, ScoreIffRevealed,
    SessionInvariants,
};
pub use phases::{ChannelPolicy, SessionPhase, SessionPolicy};
pub use score::{PERFECT_SCORE, Score, compute_score, distance};
pub use session::{GameSession, SessionEvent, SessionSnapshot};
pub use types::{CHANNEL_MAX, Channel, Color};
