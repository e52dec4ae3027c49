//! Tests for target generation and scoring over generated rounds.

use rgb_guess::{
    Color, ColorSource, GameSession, PERFECT_SCORE, RandomColorGenerator, SessionPolicy,
    compute_score,
};

#[test]
fn test_seeded_generator_is_reproducible() {
    let mut first = RandomColorGenerator::seeded(2020);
    let mut second = RandomColorGenerator::seeded(2020);

    for _ in 0..1000 {
        let a = first.generate();
        let b = second.generate();
        assert_eq!(a, b);
        assert!(a.is_valid());
    }
}

#[test]
fn test_new_round_draws_target_from_source() {
    let mut expected = RandomColorGenerator::seeded(9);
    let mut source = RandomColorGenerator::seeded(9);

    let session = GameSession::new_round(&mut source, Color::grey(), SessionPolicy::default());
    assert_eq!(session.target(), &expected.generate());
    assert_eq!(session.guess(), &Color::grey());
}

#[test]
fn test_score_properties_over_generated_colors() {
    let mut source = RandomColorGenerator::seeded(11);
    for _ in 0..500 {
        let a = source.generate();
        let b = source.generate();
        let score = compute_score(&a, &b);
        assert_eq!(score, compute_score(&b, &a));
        assert_eq!(score, compute_score(&a, &b));
        assert!((-73..=PERFECT_SCORE).contains(&score));
        assert_eq!(compute_score(&a, &a), PERFECT_SCORE);
    }
}

/// Source that always yields the same color.
struct FixedSource(Color);

impl ColorSource for FixedSource {
    fn generate(&mut self) -> Color {
        self.0
    }
}

#[test]
fn test_custom_source_injection() {
    let fixed = Color::new(0.0, 0.0, 0.0).expect("Valid color");
    let mut source = FixedSource(fixed);
    let mut session = GameSession::new_round(
        &mut source,
        Color::saturating(1.0, 1.0, 1.0),
        SessionPolicy::default(),
    );
    assert_eq!(session.reveal(), -73);
}
