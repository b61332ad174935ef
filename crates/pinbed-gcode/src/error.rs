//! Error types for motion planning and emission.

use thiserror::Error;

/// Errors that can occur while planning or writing motion commands.
#[derive(Error, Debug)]
pub enum GcodeError {
    /// Undetermined pins need a fallback height, but no pin has a
    /// measured height to average.
    #[error("cannot derive a fallback height: no pin has a measured height")]
    NoMeasuredHeights,

    /// The output sink failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for G-code operations.
pub type Result<T> = std::result::Result<T, GcodeError>;
