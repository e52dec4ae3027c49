//! Guess sessions: one round of the color-guessing game.
//!
//! A session holds a fixed target, a mutable guess, and its phase. The
//! guess is edited channel by channel until [`GameSession::reveal`] freezes
//! the score. Starting a new round builds a new session rather than
//! mutating the old one.

use super::error::SessionError;
use super::generator::ColorSource;
use super::invariants::assert_invariants;
use super::phases::{ChannelPolicy, SessionPhase, SessionPolicy};
use super::score::{Score, compute_score};
use super::types::{Channel, Color, in_range, saturate};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Change notification published by a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The guess changed. `channel` is `None` when the whole guess was replaced.
    GuessChanged {
        /// Channel that was edited.
        channel: Option<Channel>,
        /// Guess after the edit.
        guess: Color,
    },
    /// The session was revealed.
    Revealed {
        /// Frozen score.
        score: Score,
        /// Guess at reveal time.
        guess: Color,
        /// The target.
        target: Color,
    },
}

/// Serializable view of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// The target color.
    pub target: Color,
    /// The current guess.
    pub guess: Color,
    /// Whether the session has been revealed.
    pub revealed: bool,
    /// Score, present once revealed.
    pub score: Option<Score>,
}

/// One round of the game.
#[derive(Debug)]
pub struct GameSession {
    target: Color,
    guess: Color,
    phase: SessionPhase,
    policy: SessionPolicy,
    subscribers: Vec<mpsc::UnboundedSender<SessionEvent>>,
}

impl GameSession {
    /// Creates a session in the guessing phase with the default policy.
    #[instrument]
    pub fn new(target: Color, initial_guess: Color) -> Self {
        Self::with_policy(target, initial_guess, SessionPolicy::default())
    }

    /// Creates a session in the guessing phase with an explicit policy.
    #[instrument]
    pub fn with_policy(target: Color, initial_guess: Color, policy: SessionPolicy) -> Self {
        info!(%target, guess = %initial_guess, "Starting new round");
        let session = Self {
            target,
            guess: initial_guess,
            phase: SessionPhase::Guessing,
            policy,
            subscribers: Vec::new(),
        };
        assert_invariants(&session);
        session
    }

    /// Starts a round with a target drawn from `source`.
    #[instrument(skip(source))]
    pub fn new_round(
        source: &mut impl ColorSource,
        initial_guess: Color,
        policy: SessionPolicy,
    ) -> Self {
        let target = source.generate();
        Self::with_policy(target, initial_guess, policy)
    }

    /// Returns the target color.
    pub fn target(&self) -> &Color {
        &self.target
    }

    /// Returns the current guess.
    pub fn guess(&self) -> &Color {
        &self.guess
    }

    /// Returns the current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the session policy.
    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// Returns true once the score has been revealed.
    pub fn revealed(&self) -> bool {
        self.phase.is_revealed()
    }

    /// Returns the score, present only after reveal.
    pub fn score(&self) -> Option<Score> {
        self.phase.score()
    }

    /// Returns a serializable view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            target: self.target,
            guess: self.guess,
            revealed: self.revealed(),
            score: self.score(),
        }
    }

    /// Sets one channel of the guess.
    ///
    /// Out-of-range values are clamped or rejected according to the session's
    /// [`ChannelPolicy`]; NaN is always rejected. After reveal the edit fails
    /// with [`SessionError::InvalidState`] unless the policy unlocks it, in
    /// which case the guess changes but the frozen score does not.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn set_channel(&mut self, channel: Channel, value: f64) -> Result<(), SessionError> {
        self.check_editable()?;
        let value = self.admit(Some(channel), value)?;
        self.guess = self.guess.with_channel(channel, value);
        debug!(%channel, value, guess = %self.guess, "Guess channel updated");
        assert_invariants(self);
        self.publish(SessionEvent::GuessChanged {
            channel: Some(channel),
            guess: self.guess,
        });
        Ok(())
    }

    /// Replaces the whole guess. Same rules as [`GameSession::set_channel`].
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn set_guess(&mut self, guess: Color) -> Result<(), SessionError> {
        self.check_editable()?;
        self.guess = guess;
        debug!(guess = %self.guess, "Guess replaced");
        assert_invariants(self);
        self.publish(SessionEvent::GuessChanged {
            channel: None,
            guess: self.guess,
        });
        Ok(())
    }

    /// Computes and freezes the score.
    ///
    /// The first call transitions to [`SessionPhase::Revealed`]; later calls
    /// return the stored score without recomputing it.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn reveal(&mut self) -> Score {
        if let SessionPhase::Revealed { score } = self.phase {
            debug!(score, "Already revealed");
            return score;
        }

        let score = compute_score(&self.guess, &self.target);
        self.phase = SessionPhase::Revealed { score };
        info!(score, guess = %self.guess, target = %self.target, "Round revealed");
        assert_invariants(self);
        self.publish(SessionEvent::Revealed {
            score,
            guess: self.guess,
            target: self.target,
        });
        score
    }

    /// Builds a fresh session for the next round, leaving `self` untouched.
    ///
    /// The new session keeps this session's policy but none of its subscribers.
    #[instrument(skip(self))]
    pub fn reset(&self, new_target: Color, new_guess: Color) -> GameSession {
        GameSession::with_policy(new_target, new_guess, self.policy)
    }

    /// Subscribes to future change events.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        debug!(subscribers = self.subscribers.len(), "Subscriber added");
        rx
    }

    fn check_editable(&self) -> Result<(), SessionError> {
        if self.revealed() && self.policy.lock_after_reveal {
            warn!("Guess edit attempted after reveal");
            return Err(SessionError::InvalidState(
                "guess is locked after reveal".to_string(),
            ));
        }
        Ok(())
    }

    fn admit(&self, channel: Option<Channel>, value: f64) -> Result<f64, SessionError> {
        if in_range(value) {
            return Ok(value);
        }
        if value.is_nan() || self.policy.channel_policy == ChannelPolicy::Reject {
            warn!(?channel, value, "Rejected channel value");
            return Err(SessionError::InvalidChannelValue { channel, value });
        }
        let clamped = saturate(value);
        debug!(?channel, value, clamped, "Clamped channel value");
        Ok(clamped)
    }

    fn publish(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}
