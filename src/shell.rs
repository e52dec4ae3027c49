//! Line-oriented game shell.
//!
//! Parses player commands and applies them to the current round. The shell
//! owns the generator, the active session, and the elapsed-time counter.

use crate::config::GameConfig;
use crate::counter::{CounterHandle, PeriodicCounter};
use crate::games::rgb::{Channel, ColorSource, GameSession, SessionError, SessionEvent};
use derive_more::{Display, Error};
use std::str::FromStr;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Help text listing shell commands.
pub const HELP: &str = "\
Commands:
  red|r <0..1>     set the red channel
  green|g <0..1>   set the green channel
  blue|b <0..1>    set the blue channel
  guess            show the current guess
  target           show the target
  reveal | hit     reveal your score
  new              start a new round
  time             seconds since the shell started
  state            print the round as JSON
  help             show this text
  quit             exit";

/// A parsed shell command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Set one guess channel.
    Set(Channel, f64),
    /// Show the guess.
    Guess,
    /// Show the target.
    Target,
    /// Reveal the score.
    Reveal,
    /// Start a new round.
    New,
    /// Show the counter.
    Time,
    /// Print the session snapshot as JSON.
    State,
    /// Show help.
    Help,
    /// Exit the shell.
    Quit,
}

/// Unparsable shell input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{}", message)]
pub struct CommandError {
    /// What was wrong with the input.
    pub message: String,
}

impl CommandError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::new("empty command"));
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "guess" => Command::Guess,
            "target" => Command::Target,
            "reveal" | "hit" => Command::Reveal,
            "new" => Command::New,
            "time" => Command::Time,
            "state" => Command::State,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                let channel = Channel::from_str(other)
                    .map_err(|_| CommandError::new(format!("unknown command '{}'", other)))?;
                let raw = words
                    .next()
                    .ok_or_else(|| CommandError::new(format!("missing value for {}", channel)))?;
                let value = raw
                    .parse::<f64>()
                    .map_err(|_| CommandError::new(format!("'{}' is not a number", raw)))?;
                Command::Set(channel, value)
            }
        };

        if let Some(extra) = words.next() {
            return Err(CommandError::new(format!("unexpected argument '{}'", extra)));
        }
        Ok(command)
    }
}

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to show the player.
    Message(String),
    /// The player asked to leave.
    Quit,
}

/// Interactive game state: generator, current round, and clock.
#[derive(Debug)]
pub struct GameShell<S> {
    config: GameConfig,
    source: S,
    session: GameSession,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    counter: PeriodicCounter,
    counter_handle: CounterHandle,
}

impl<S: ColorSource> GameShell<S> {
    /// Starts the shell with a first round. Must run inside a tokio runtime.
    #[instrument(skip(source))]
    pub fn new(config: GameConfig, mut source: S) -> Self {
        let mut session =
            GameSession::new_round(&mut source, *config.initial_guess(), config.session_policy());
        let events = session.subscribe();
        let mut counter = PeriodicCounter::new(config.tick_period());
        let counter_handle = counter.start();
        info!("Game shell ready");
        Self {
            config,
            source,
            session,
            events,
            counter,
            counter_handle,
        }
    }

    /// Returns the active round.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Returns the elapsed-time counter.
    pub fn counter(&self) -> &PeriodicCounter {
        &self.counter
    }

    /// Applies one command to the shell.
    #[instrument(skip(self))]
    pub fn execute(&mut self, command: Command) -> Result<Reply, SessionError> {
        let text = match command {
            Command::Set(channel, value) => {
                self.session.set_channel(channel, value)?;
                format!("Guess: {}", self.session.guess())
            }
            Command::Guess => format!("Guess: {}", self.session.guess()),
            Command::Target => format!("Target: {}", self.session.target()),
            Command::Reveal => {
                let score = self.session.reveal();
                format!(
                    "Your score: {}\nGuess:  {}\nTarget: {}",
                    score,
                    self.session.guess(),
                    self.session.target()
                )
            }
            Command::New => {
                self.next_round();
                format!("New round. Match this color: {}", self.session.target())
            }
            Command::Time => format!("{}", self.counter.current_value()),
            Command::State => serde_json::to_string(&self.session.snapshot())
                .map_err(|e| SessionError::InvalidState(format!("snapshot failed: {}", e)))?,
            Command::Help => HELP.to_string(),
            Command::Quit => {
                self.counter.stop(&self.counter_handle);
                return Ok(Reply::Quit);
            }
        };
        Ok(Reply::Message(text))
    }

    /// Drains session events published since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }

    fn next_round(&mut self) {
        let target = self.source.generate();
        let mut session = self.session.reset(target, *self.config.initial_guess());
        self.events = session.subscribe();
        self.session = session;
        debug!(target = %self.session.target(), "Round replaced");
    }
}
