//! Morphing headline text.
//!
//! A [`MorphEngine`] rests on each phrase of a fixed list, then dissolves it
//! into the next one with complementary opacity and blur curves, forever.
//! [`MorphingText`] mounts an engine on a host's per-frame clock
//! ([`FrameScheduler`]), and [`MorphText`] draws the resulting
//! [`MorphFrame`] into a ratatui buffer.

pub mod config;
pub mod curve;
pub mod engine;
pub mod error;
pub mod frame;
pub mod oklch;
pub mod render;
pub mod scheduler;
pub mod view;

pub use config::MorphConfig;
pub use engine::{MorphEngine, MorphState};
pub use error::MorphError;
pub use frame::{Layer, MorphFrame, Phase};
pub use render::MorphText;
pub use scheduler::{FrameCallback, FrameLoop, FrameScheduler, FrameToken};
pub use view::MorphingText;
