//! Error types for brio-sampler.

use thiserror::Error;

/// Error type for clip registration.
#[derive(Error, Debug)]
pub enum ClipError {
    #[error("Clip key must not be empty")]
    EmptyKey,

    #[error("Invalid sample rate: {0}. Must be finite and positive")]
    InvalidSampleRate(f64),

    #[error("Clip has no channels")]
    NoChannels,

    #[error("Clip has no frames")]
    NoFrames,

    #[error("Channel {channel} holds {got} frames, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        got: usize,
    },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, ClipError>;
