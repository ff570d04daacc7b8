use thiserror::Error;

/// Domain-specific error types for Stitchplay
///
/// Every variant is recoverable: bad cue-point input degrades to "no ad
/// breaks", unknown lifecycle events are ignored, and commands issued before
/// media attaches are held and replayed. None of these abort playback.
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Invalid cue points: {0}")]
    InvalidCuePoints(String),

    #[error("Ad lifecycle event for unknown break index: {0}")]
    UnknownAdBreak(usize),

    #[error("No media element attached")]
    MediaUnavailable,
}

// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, PlayerError>;
