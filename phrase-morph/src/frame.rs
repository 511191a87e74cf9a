use std::sync::Arc;

/// Which half of the cycle the engine is in. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Outgoing phrase at full clarity, incoming phrase hidden.
    Cooldown,
    /// Both phrases visible with complementary opacity and blur.
    Morph,
}

/// One text slot as it should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub text: Arc<str>,
    /// Percent, in `[0, 100]`.
    pub opacity: f32,
    /// Blur radius, in `[0, max_blur]`.
    pub blur: f32,
}

/// Frozen projection of the engine state. Produced by the engine, consumed by
/// the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphFrame {
    pub phase: Phase,
    /// Morph progress in `[0, 1]`; always 0 during cooldown.
    pub fraction: f32,
    pub outgoing: Layer,
    pub incoming: Layer,
}
