use std::time::Duration;

use crate::error::MorphError;

/// Timing of the two phases plus the shape of the opacity and blur curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphConfig {
    /// Length of the crossfade between two phrases.
    pub morph_duration: Duration,
    /// How long a phrase rests at full clarity before the next morph.
    pub cooldown_duration: Duration,
    pub opacity_exponent: f32,
    pub blur_scale: f32,
    pub max_blur: f32,
}

impl MorphConfig {
    /// Slow dissolve for a hero headline: 3 s rest, 2 s morph.
    pub const HERO: Self = Self {
        morph_duration: Duration::from_secs(2),
        cooldown_duration: Duration::from_secs(3),
        opacity_exponent: 0.4,
        blur_scale: 8.0,
        max_blur: 100.0,
    };

    /// Same curves, half the time. Suits smaller inline elements.
    pub const BRISK: Self = Self {
        morph_duration: Duration::from_millis(1000),
        cooldown_duration: Duration::from_millis(1500),
        ..Self::HERO
    };

    pub fn validate(&self) -> Result<(), MorphError> {
        if self.morph_duration.is_zero() {
            return Err(MorphError::InvalidConfig("morph duration must be non-zero"));
        }

        let curves = [self.opacity_exponent, self.blur_scale, self.max_blur];

        if curves.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(MorphError::InvalidConfig(
                "curve parameters must be finite and non-negative",
            ));
        }

        Ok(())
    }

    /// One full rest-then-morph cycle.
    pub fn cycle(&self) -> Duration {
        self.cooldown_duration + self.morph_duration
    }
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self::HERO
    }
}
