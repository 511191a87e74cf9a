use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::MorphConfig;
use crate::curve;
use crate::error::MorphError;
use crate::frame::{Layer, MorphFrame, Phase};

/// Everything the engine needs to reproduce a frame.
///
/// `cooldown_remaining > 0` means cooldown, zero means morph. `morph_elapsed`
/// never reaches `morph_duration`: the tick that gets there completes the
/// morph and resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphState {
    /// Index of the outgoing phrase.
    pub current_index: usize,
    pub morph_elapsed: Duration,
    pub cooldown_remaining: Duration,
}

/// Cycles through a fixed phrase list, resting on each phrase and then
/// dissolving it into the next.
///
/// The engine owns no clock. The host feeds it the wall-clock delta since the
/// previous frame through [`MorphEngine::tick`].
#[derive(Debug, Clone)]
pub struct MorphEngine {
    phrases: Vec<Arc<str>>,
    config: MorphConfig,
    state: MorphState,
}

impl MorphEngine {
    pub fn new<I, S>(phrases: I, config: MorphConfig) -> Result<Self, MorphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        config.validate()?;

        let phrases: Vec<Arc<str>> = phrases.into_iter().map(Into::into).collect();

        if phrases.is_empty() {
            return Err(MorphError::InvalidInput("phrase list must not be empty"));
        }

        debug!(phrases = phrases.len(), "morph engine created");

        Ok(Self {
            phrases,
            config,
            state: MorphState {
                current_index: 0,
                morph_elapsed: Duration::ZERO,
                cooldown_remaining: config.cooldown_duration,
            },
        })
    }

    pub fn phrases(&self) -> &[Arc<str>] {
        &self.phrases
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn state(&self) -> MorphState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.cooldown_remaining.is_zero() {
            Phase::Morph
        } else {
            Phase::Cooldown
        }
    }

    /// Morph progress in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        match self.phase() {
            Phase::Cooldown => 0.0,
            Phase::Morph => {
                let elapsed = self.state.morph_elapsed.as_secs_f64();
                let total = self.config.morph_duration.as_secs_f64();
                ((elapsed / total) as f32).clamp(0.0, 1.0)
            }
        }
    }

    pub fn outgoing(&self) -> &Arc<str> {
        &self.phrases[self.state.current_index]
    }

    pub fn incoming(&self) -> &Arc<str> {
        &self.phrases[(self.state.current_index + 1) % self.phrases.len()]
    }

    /// Advance by one host frame and project the result.
    pub fn tick(&mut self, delta: Duration) -> MorphFrame {
        self.advance(delta);
        self.frame()
    }

    /// Project the current state without advancing it.
    pub fn frame(&self) -> MorphFrame {
        let max_blur = self.config.max_blur;

        match self.phase() {
            Phase::Cooldown => MorphFrame {
                phase: Phase::Cooldown,
                fraction: 0.0,
                outgoing: Layer {
                    text: self.outgoing().clone(),
                    opacity: 100.0,
                    blur: 0.0,
                },
                incoming: Layer {
                    text: self.incoming().clone(),
                    opacity: 0.0,
                    blur: max_blur,
                },
            },

            Phase::Morph => {
                let fraction = self.fraction();

                MorphFrame {
                    phase: Phase::Morph,
                    fraction,
                    outgoing: self.layer(self.outgoing(), 1.0 - fraction),
                    incoming: self.layer(self.incoming(), fraction),
                }
            }
        }
    }

    fn layer(&self, text: &Arc<str>, fraction: f32) -> Layer {
        let MorphConfig {
            opacity_exponent,
            blur_scale,
            max_blur,
            ..
        } = self.config;

        Layer {
            text: text.clone(),
            opacity: curve::opacity(fraction, opacity_exponent),
            blur: curve::blur(fraction, blur_scale, max_blur),
        }
    }

    /// Consume `delta` across as many phase boundaries as it spans. Time past
    /// a boundary is never dropped: cooldown overshoot flows into the morph and
    /// morph overshoot into the next cooldown.
    fn advance(&mut self, delta: Duration) {
        let mut remaining = delta;

        loop {
            if !self.state.cooldown_remaining.is_zero() {
                if self.state.cooldown_remaining > remaining {
                    self.state.cooldown_remaining -= remaining;
                    return;
                }

                remaining -= self.state.cooldown_remaining;
                self.state.cooldown_remaining = Duration::ZERO;
            }

            if self.state.morph_elapsed.is_zero() {
                remaining = self.skip_whole_cycles(remaining);
            }

            let left = self.config.morph_duration - self.state.morph_elapsed;

            if remaining < left {
                self.state.morph_elapsed += remaining;
                return;
            }

            remaining -= left;
            self.complete_morph();
        }
    }

    fn complete_morph(&mut self) {
        self.state.current_index = (self.state.current_index + 1) % self.phrases.len();
        self.state.morph_elapsed = Duration::ZERO;
        self.state.cooldown_remaining = self.config.cooldown_duration;

        trace!(index = self.state.current_index, phrase = %self.outgoing(), "morph complete");
    }

    /// At the start of a morph a full cycle lands on the start of the next
    /// morph, one phrase further. Fold those away so a stalled host catches up
    /// in constant time.
    fn skip_whole_cycles(&mut self, remaining: Duration) -> Duration {
        let cycle = self.config.cycle().as_nanos();
        let cycles = remaining.as_nanos() / cycle;

        if cycles == 0 {
            return remaining;
        }

        let len = self.phrases.len();
        let step = (cycles % len as u128) as usize;
        self.state.current_index = (self.state.current_index + step) % len;

        debug!(cycles = cycles as u64, "caught up after a stalled frame");

        let left = remaining.as_nanos() % cycle;
        Duration::from_nanos(u64::try_from(left).unwrap_or(u64::MAX))
    }
}
