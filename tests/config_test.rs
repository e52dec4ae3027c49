//! Tests for TOML game configuration.

use std::fs;
use std::time::Duration;
use tempfile::TempDir;

use rgb_guess::{ChannelPolicy, Color, GameConfig};

#[test]
fn test_defaults() {
    let config = GameConfig::default();
    assert_eq!(config.seed(), &None);
    assert_eq!(config.initial_guess(), &Color::grey());
    assert_eq!(config.channel_policy(), &ChannelPolicy::Clamp);
    assert!(*config.lock_after_reveal());
    assert_eq!(config.tick_period(), Duration::from_secs(1));
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = GameConfig::from_toml("").expect("Parse failed");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_from_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("game.toml");
    fs::write(
        &path,
        r#"seed = 42
channel_policy = "reject"
lock_after_reveal = false
tick_period_ms = 250

[initial_guess]
red = 0.2
green = 0.4
blue = 0.6
"#,
    )
    .expect("Failed to write TOML");

    let config = GameConfig::from_file(&path).expect("Load failed");
    assert_eq!(config.seed(), &Some(42));
    assert_eq!(config.initial_guess().green(), 0.4);
    let policy = config.session_policy();
    assert_eq!(policy.channel_policy, ChannelPolicy::Reject);
    assert!(!policy.lock_after_reveal);
    assert_eq!(config.tick_period(), Duration::from_millis(250));
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_out_of_range_initial_guess_fails() {
    let result = GameConfig::from_toml("[initial_guess]\nred = 1.5\ngreen = 0.0\nblue = 0.0\n");
    assert!(result.is_err());
}

#[test]
fn test_zero_tick_period_fails() {
    let err = GameConfig::from_toml("tick_period_ms = 0").unwrap_err();
    assert!(err.message.contains("tick_period_ms"));
}

#[test]
fn test_seed_override() {
    let config = GameConfig::default().with_seed(Some(5));
    assert_eq!(config.seed(), &Some(5));
    let config = config.with_seed(None);
    assert_eq!(config.seed(), &Some(5));
}
