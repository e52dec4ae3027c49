//! Target color generation.

use super::types::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Anything that can produce fresh target colors.
pub trait ColorSource {
    /// Draws a new color with every channel in `[0, 1)`.
    fn generate(&mut self) -> Color;
}

/// Draws each channel independently from a uniform distribution over `[0, 1)`.
#[derive(Debug, Clone)]
pub struct RandomColorGenerator<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomColorGenerator<R> {
    /// Wraps an existing random number generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomColorGenerator<StdRng> {
    /// Creates a generator seeded from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Creates a reproducible generator from a fixed seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ColorSource for RandomColorGenerator<R> {
    fn generate(&mut self) -> Color {
        let red = self.rng.random_range(0.0..1.0);
        let green = self.rng.random_range(0.0..1.0);
        let blue = self.rng.random_range(0.0..1.0);
        debug!(red, green, blue, "Generated color");
        // random_range over a half-open range never yields 1.0, saturating is a no-op here.
        Color::saturating(red, green, blue)
    }
}
