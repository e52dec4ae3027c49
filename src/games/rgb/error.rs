//! Errors raised by guess sessions.

use super::types::Channel;

/// Error that can occur when building colors or driving a session.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum SessionError {
    /// A channel value fell outside `[0, 1)` (or was NaN).
    #[display("Invalid value {} for channel {}", value, channel_label(channel))]
    InvalidChannelValue {
        /// The channel being set, when known.
        channel: Option<Channel>,
        /// The offending value.
        value: f64,
    },

    /// The operation is not allowed in the session's current phase.
    #[display("Invalid session state: {}", _0)]
    InvalidState(String),
}

impl std::error::Error for SessionError {}

fn channel_label(channel: &Option<Channel>) -> &'static str {
    match channel {
        Some(Channel::Red) => "red",
        Some(Channel::Green) => "green",
        Some(Channel::Blue) => "blue",
        None => "?",
    }
}
