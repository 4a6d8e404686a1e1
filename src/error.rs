//! Error types for the note detection engine

use std::fmt;

/// Errors that can occur during detection or configuration
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// Invalid configuration parameters, rejected at configuration time
    Configuration(String),

    /// A frequency that cannot be mapped to a musical note (non-positive or non-finite)
    InvalidFrequency(f32),
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            DetectionError::InvalidFrequency(hz) => {
                write!(f, "Invalid frequency: {} Hz cannot be mapped to a note", hz)
            }
        }
    }
}

impl std::error::Error for DetectionError {}
