/// Failures the morph engine can report. Both are caller mistakes; nothing
/// here is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MorphError {
    /// The phrase list was empty.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}
