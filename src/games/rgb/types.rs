//! Core domain types for the color-guessing game.

use super::error::SessionError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Largest value a channel may hold (the greatest `f64` below 1.0).
pub const CHANNEL_MAX: f64 = 1.0 - f64::EPSILON / 2.0;

/// One of the three color components.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Channel {
    /// Red component.
    #[strum(to_string = "red", serialize = "r")]
    Red,
    /// Green component.
    #[strum(to_string = "green", serialize = "g")]
    Green,
    /// Blue component.
    #[strum(to_string = "blue", serialize = "b")]
    Blue,
}

/// Returns true if `value` is a legal channel value, i.e. in `[0, 1)`.
pub fn in_range(value: f64) -> bool {
    (0.0..1.0).contains(&value)
}

/// Clamps `value` into `[0, CHANNEL_MAX]`. NaN maps to 0.
pub fn saturate(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, CHANNEL_MAX)
    }
}

/// An RGB color with each channel in `[0, 1)`.
///
/// Fields are private so every `Color` in circulation has passed through
/// [`Color::new`] or [`Color::saturating`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawColor")]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
}

/// Unvalidated wire form of [`Color`].
#[derive(Deserialize)]
struct RawColor {
    red: f64,
    green: f64,
    blue: f64,
}

impl TryFrom<RawColor> for Color {
    type Error = SessionError;

    fn try_from(raw: RawColor) -> Result<Self, Self::Error> {
        Color::new(raw.red, raw.green, raw.blue)
    }
}

impl Color {
    /// Creates a color, rejecting any channel outside `[0, 1)`.
    pub fn new(red: f64, green: f64, blue: f64) -> Result<Self, SessionError> {
        for (channel, value) in [
            (Channel::Red, red),
            (Channel::Green, green),
            (Channel::Blue, blue),
        ] {
            if !in_range(value) {
                return Err(SessionError::InvalidChannelValue {
                    channel: Some(channel),
                    value,
                });
            }
        }
        Ok(Self { red, green, blue })
    }

    /// Creates a color, clamping each channel into range.
    pub fn saturating(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red: saturate(red),
            green: saturate(green),
            blue: saturate(blue),
        }
    }

    /// Mid-grey, the usual starting guess.
    pub fn grey() -> Self {
        Self {
            red: 0.5,
            green: 0.5,
            blue: 0.5,
        }
    }

    /// Returns the red channel.
    pub fn red(&self) -> f64 {
        self.red
    }

    /// Returns the green channel.
    pub fn green(&self) -> f64 {
        self.green
    }

    /// Returns the blue channel.
    pub fn blue(&self) -> f64 {
        self.blue
    }

    /// Returns the value of one channel.
    pub fn channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Returns a copy with one channel replaced (value must already be in range).
    pub(crate) fn with_channel(mut self, channel: Channel, value: f64) -> Self {
        debug_assert!(in_range(value), "channel value {value} out of range");
        match channel {
            Channel::Red => self.red = value,
            Channel::Green => self.green = value,
            Channel::Blue => self.blue = value,
        }
        self
    }

    /// Returns true if every channel is in `[0, 1)`.
    pub fn is_valid(&self) -> bool {
        in_range(self.red) && in_range(self.green) && in_range(self.blue)
    }

    /// Converts to 8-bit channels by truncating `channel * 255`.
    pub fn to_rgb8(&self) -> [u8; 3] {
        // Channels are below 1.0, so the product is below 255 and the cast cannot saturate.
        [
            (self.red * 255.0) as u8,
            (self.green * 255.0) as u8,
            (self.blue * 255.0) as u8,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::grey()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "R: {} G: {} B: {}", r, g, b)
    }
}
