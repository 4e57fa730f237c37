//! melvoc - robust mel-spectrogram vocoder
//!
//! This crate turns a mel-scaled spectrogram (typically the output of an
//! upstream acoustic model) into an audible waveform. Its job is robustness
//! rather than naturalness: malformed, degenerate or non-finite input never
//! crashes the pipeline and never leaks NaN into the output.
//!
//! # Overview
//!
//! A vocoding request flows strictly downstream:
//!
//! 1. **Sanitize** - clip, rescale and repair the raw matrix into a bounded
//!    synthesis range
//! 2. **Extend** - pad under-length spectrograms up to a minimum duration
//! 3. **Select** - try synthesis strategies in priority order (phoneme-aware
//!    additive synthesis, filtered harmonic stack, minimal sine harmonics)
//!    and keep the first validated result
//! 4. **Limit** - bound the final peak amplitude for safe playback
//!
//! If every strategy fails, the caller still receives a valid silent buffer
//! of the expected duration; vocoding never throws for value pathology.
//!
//! # Determinism
//!
//! All synthesis is deterministic. Given the same spectrogram, text hint and
//! seed, the output is identical across runs. The crate uses PCG32 for all
//! random number generation, with per-component seeds derived via BLAKE3
//! hashing.
//!
//! # Example
//!
//! ```ignore
//! use melvoc::{vocode, VocoderConfig};
//!
//! let config = VocoderConfig::default();
//! let mel: Vec<Vec<f64>> = model.infer(text)?; // frames x 80 bands
//!
//! let output = vocode(mel, text.chars().count(), &config)?;
//! println!(
//!     "{}s of audio via {:?}",
//!     output.waveform.duration_seconds(),
//!     output.report.strategy,
//! );
//! ```
//!
//! # Crate Structure
//!
//! - [`vocode()`] - Main entry point for waveform reconstruction
//! - [`config`] - Vocoder parameters with serde support
//! - [`spectrogram`] - Matrix container, sanitization, frame extension
//! - [`phoneme`] - Frame classification and acoustic profile table
//! - [`synthesis`] - The three synthesis strategies
//! - [`selector`] - Ordered fallback over strategies
//! - [`filter`] / [`oscillator`] - DSP primitives
//! - [`rng`] - Deterministic RNG with seed derivation

pub mod config;
pub mod error;
pub mod filter;
pub mod oscillator;
pub mod phoneme;
pub mod pipeline;
pub mod rng;
pub mod selector;
pub mod spectrogram;
pub mod synthesis;

// Re-export main types at crate root
pub use config::VocoderConfig;
pub use error::{VocoderError, VocoderResult};
pub use pipeline::{vocode, VocodeOutput, WaveformBuffer};
pub use selector::{
    AttemptOutcome, Selector, SelectorReport, SelectorState, SynthesisAttempt,
};
pub use spectrogram::MelSpectrogram;
pub use synthesis::{StrategyKind, SynthesisStrategy};
