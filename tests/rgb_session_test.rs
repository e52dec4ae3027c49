//! Tests for guess sessions: reveal, locking, policies, and events.

use rgb_guess::{
    Channel, ChannelPolicy, Color, GameSession, SessionError, SessionEvent, SessionPhase,
    SessionPolicy,
};

fn color(r: f64, g: f64, b: f64) -> Color {
    Color::new(r, g, b).expect("Valid color")
}

fn target() -> Color {
    color(0.8, 0.3, 0.1)
}

#[test]
fn test_reveal_scores_guess() {
    let mut session = GameSession::new(target(), Color::grey());
    session.set_channel(Channel::Red, 0.8).expect("Set red");
    session.set_channel(Channel::Green, 0.1).expect("Set green");
    session.set_channel(Channel::Blue, 0.3).expect("Set blue");

    assert_eq!(session.reveal(), 72);
    assert!(session.revealed());
    assert_eq!(session.score(), Some(72));
    assert_eq!(session.phase(), SessionPhase::Revealed { score: 72 });
}

#[test]
fn test_reveal_is_idempotent() {
    let mut session = GameSession::new(target(), color(0.1, 0.9, 0.5));
    let first = session.reveal();
    let second = session.reveal();
    assert_eq!(first, second);
    assert_eq!(session.score(), Some(first));
}

#[test]
fn test_perfect_match_scores_100() {
    let mut session = GameSession::new(target(), target());
    assert_eq!(session.reveal(), 100);
}

#[test]
fn test_edit_after_reveal_rejected_by_default() {
    let mut session = GameSession::new(target(), Color::grey());
    session.reveal();

    let result = session.set_channel(Channel::Red, 0.1);
    assert!(matches!(result, Err(SessionError::InvalidState(_))));
    assert_eq!(session.guess(), &Color::grey());

    let result = session.set_guess(target());
    assert!(matches!(result, Err(SessionError::InvalidState(_))));
}

#[test]
fn test_edit_after_reveal_allowed_when_unlocked() {
    let policy = SessionPolicy {
        lock_after_reveal: false,
        ..SessionPolicy::default()
    };
    let mut session = GameSession::with_policy(target(), Color::grey(), policy);
    let score = session.reveal();

    session.set_channel(Channel::Red, 0.8).expect("Edit allowed");
    assert_eq!(session.guess().red(), 0.8);
    // Score stays frozen at the value computed on reveal.
    assert_eq!(session.score(), Some(score));
    assert_eq!(session.reveal(), score);
}

#[test]
fn test_reject_policy_refuses_out_of_range() {
    let policy = SessionPolicy {
        channel_policy: ChannelPolicy::Reject,
        ..SessionPolicy::default()
    };
    let mut session = GameSession::with_policy(target(), Color::grey(), policy);

    let result = session.set_channel(Channel::Blue, 1.0);
    assert_eq!(
        result,
        Err(SessionError::InvalidChannelValue {
            channel: Some(Channel::Blue),
            value: 1.0
        })
    );
    assert_eq!(session.guess().blue(), 0.5);
}

#[test]
fn test_clamp_policy_accepts_out_of_range() {
    let mut session = GameSession::new(target(), Color::grey());
    session.set_channel(Channel::Green, 1.0).expect("Clamped");
    assert!(session.guess().green() < 1.0);
    assert!(session.guess().green() > 0.999);
}

#[test]
fn test_reset_leaves_original_untouched() {
    let mut session = GameSession::new(target(), Color::grey());
    let score = session.reveal();

    let next = session.reset(color(0.2, 0.2, 0.2), Color::grey());
    assert!(!next.revealed());
    assert_eq!(next.target(), &color(0.2, 0.2, 0.2));
    assert_eq!(next.policy(), session.policy());

    assert!(session.revealed());
    assert_eq!(session.score(), Some(score));
    assert_eq!(session.target(), &target());
}

#[test]
fn test_subscribers_receive_events() {
    let mut session = GameSession::new(target(), Color::grey());
    let mut rx = session.subscribe();

    session.set_channel(Channel::Red, 0.7).expect("Set red");
    session.reveal();
    session.reveal();

    match rx.try_recv().expect("Guess event") {
        SessionEvent::GuessChanged { channel, guess } => {
            assert_eq!(channel, Some(Channel::Red));
            assert_eq!(guess.red(), 0.7);
        }
        other => panic!("Unexpected event {:?}", other),
    }
    match rx.try_recv().expect("Reveal event") {
        SessionEvent::Revealed { score, target: t, .. } => {
            assert_eq!(Some(score), session.score());
            assert_eq!(t, target());
        }
        other => panic!("Unexpected event {:?}", other),
    }
    // Second reveal does not republish.
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_dropped_subscriber_does_not_block_others() {
    let mut session = GameSession::new(target(), Color::grey());
    let dropped = session.subscribe();
    let mut kept = session.subscribe();
    drop(dropped);

    session.set_guess(target()).expect("Set guess");
    assert!(matches!(
        kept.try_recv(),
        Ok(SessionEvent::GuessChanged { channel: None, .. })
    ));
}
