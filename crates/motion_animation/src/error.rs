//! Animation error types

use thiserror::Error;

/// Errors raised while configuring segments, sequences, and timelines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Segment bounds outside `[0, 1]` or not strictly increasing
    #[error("Invalid segment range: start {start}, end {end}")]
    InvalidRange { start: f32, end: f32 },

    /// The base curve has the same value at both ends of the segment
    #[error("Degenerate segment: base curve is flat over [{start}, {end}]")]
    DegenerateSegment { start: f32, end: f32 },

    /// Stage weights must be finite and positive
    #[error("Invalid stage weight: {0}")]
    InvalidWeight(f32),

    /// The sequence has no total duration to lay out on a timeline
    #[error("Sequence duration is unspecified")]
    UnspecifiedDuration,

    /// Failed to parse a sequence description
    #[error("Config error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for AnimationError {
    fn from(err: toml::de::Error) -> Self {
        AnimationError::Config(err.to_string())
    }
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
