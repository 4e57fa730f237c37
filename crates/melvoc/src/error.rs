//! Error types for the vocoder pipeline.

use thiserror::Error;

/// Result type for vocoder operations.
pub type VocoderResult<T> = Result<T, VocoderError>;

/// Errors that can occur while preparing or synthesizing audio.
///
/// Only structural problems (bad shape, bad configuration) reach the caller;
/// value pathologies such as NaN or infinite spectrogram cells are repaired
/// internally and never surface as errors.
#[derive(Debug, Error)]
pub enum VocoderError {
    /// Spectrogram with zero frames.
    #[error("spectrogram contains no frames")]
    EmptySpectrogram,

    /// Frame whose band count disagrees with the first frame.
    #[error("frame {index} has {found} bands, expected {expected}")]
    RaggedFrame {
        /// Index of the offending frame.
        index: usize,
        /// Band count found in that frame.
        found: usize,
        /// Band count of the first frame.
        expected: usize,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate} Hz")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Internal synthesis error.
    #[error("synthesis error: {message}")]
    Synthesis {
        /// Error message.
        message: String,
    },
}

impl VocoderError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a synthesis error.
    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis {
            message: message.into(),
        }
    }
}
