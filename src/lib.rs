//! RGB Guess library - color-guessing game core
//!
//! The player adjusts three channels to match a randomly generated target
//! color and receives a similarity score.
//!
//! # Architecture
//!
//! - **Games**: color types, target generation, scoring, and guess sessions
//! - **Counter**: free-running tick counter on the tokio runtime
//! - **Config**: TOML game configuration
//! - **Shell**: line-oriented command driver used by the binary
//!
//! # Example
//!
//! ```
//! use rgb_guess::{Channel, Color, GameSession};
//!
//! let target = Color::new(0.8, 0.3, 0.1)?;
//! let mut session = GameSession::new(target, Color::grey());
//! session.set_channel(Channel::Red, 0.8)?;
//! session.set_channel(Channel::Green, 0.1)?;
//! session.set_channel(Channel::Blue, 0.3)?;
//! assert_eq!(session.reveal(), 72);
//! # Ok::<(), rgb_guess::SessionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod counter;
mod games;
mod shell;

// Crate-level exports - Game types
pub use games::rgb::{
    CHANNEL_MAX, Channel, ChannelPolicy, ChannelsInRange, Color, ColorSource, GameSession,
    Invariant, InvariantSet, InvariantViolation, PERFECT_SCORE, RandomColorGenerator, Score,
    ScoreIffRevealed, SessionError, SessionEvent, SessionInvariants, SessionPhase, SessionPolicy,
    SessionSnapshot, compute_score, distance,
};

// Crate-level exports - Counter
pub use counter::{CounterHandle, DEFAULT_PERIOD, PeriodicCounter};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Shell
pub use shell::{Command, CommandError, GameShell, HELP, Reply};
