//! Mel spectrogram container, sanitization, and frame extension.
//!
//! Upstream models hand the pipeline a frames-by-bands matrix whose values
//! may be wildly out of range or non-finite. [`MelSpectrogram::sanitize`]
//! maps any such matrix into the bounded synthesis range, and
//! [`MelSpectrogram::extend`] guarantees a minimum temporal length before
//! synthesis begins.

use rand::Rng;
use rand_pcg::Pcg32;
use tracing::debug;

use crate::error::{VocoderError, VocoderResult};

/// Raw input values are clipped into this range before rescaling.
pub const CLIP_MIN: f64 = -10.0;
/// Upper bound of the clipping range.
pub const CLIP_MAX: f64 = 10.0;

/// Lower bound of the sanitized synthesis range.
pub const TARGET_MIN: f64 = -4.0;
/// Upper bound of the sanitized synthesis range.
pub const TARGET_MAX: f64 = 4.0;

/// Minimum acceptable frame count for synthesis.
pub const MIN_FRAMES: usize = 50;

/// Scale factor for the noise added to extension padding frames.
const EXTENSION_NOISE: f64 = 0.1;

/// A mel-scaled spectrogram: ordered frames, each a fixed-length sequence of
/// log-scale band energies.
#[derive(Debug, Clone, PartialEq)]
pub struct MelSpectrogram {
    frames: Vec<Vec<f64>>,
    n_bands: usize,
}

impl MelSpectrogram {
    /// Wraps a frames-by-bands matrix, validating its shape.
    ///
    /// Values may be arbitrary floats including NaN and infinity; only the
    /// shape is checked here. Every frame must have the same nonzero band
    /// count.
    pub fn new(frames: Vec<Vec<f64>>) -> VocoderResult<Self> {
        let n_bands = match frames.first() {
            Some(frame) if !frame.is_empty() => frame.len(),
            Some(_) => {
                return Err(VocoderError::invalid_param(
                    "frames",
                    "frames must have at least one band",
                ))
            }
            None => return Err(VocoderError::EmptySpectrogram),
        };

        for (index, frame) in frames.iter().enumerate() {
            if frame.len() != n_bands {
                return Err(VocoderError::RaggedFrame {
                    index,
                    found: frame.len(),
                    expected: n_bands,
                });
            }
        }

        Ok(Self { frames, n_bands })
    }

    /// Number of time frames.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of mel bands per frame.
    pub fn num_bands(&self) -> usize {
        self.n_bands
    }

    /// Borrows all frames.
    pub fn frames(&self) -> &[Vec<f64>] {
        &self.frames
    }

    /// Borrows a single frame.
    pub fn frame(&self, index: usize) -> &[f64] {
        &self.frames[index]
    }

    /// Maps the matrix into the bounded synthesis range.
    ///
    /// Values are clipped into [`CLIP_MIN`, `CLIP_MAX`], linearly rescaled so
    /// the observed extrema span [`TARGET_MIN`, `TARGET_MAX`], and any
    /// remaining non-finite cells are repaired (NaN becomes 0.0, infinities
    /// become the nearest range bound). A matrix with no spread at all (every
    /// cell equal, or nothing finite) becomes all-zero instead of dividing by
    /// zero.
    ///
    /// The result always contains only finite values inside the target range,
    /// and re-sanitizing it is a no-op up to floating precision.
    pub fn sanitize(&self) -> MelSpectrogram {
        let mut non_finite = 0usize;

        let clipped: Vec<Vec<f64>> = self
            .frames
            .iter()
            .map(|frame| frame.iter().map(|&v| v.clamp(CLIP_MIN, CLIP_MAX)).collect())
            .collect();

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for frame in &clipped {
            for &v in frame {
                if v.is_finite() {
                    min = min.min(v);
                    max = max.max(v);
                } else {
                    non_finite += 1;
                }
            }
        }

        let degenerate = !(max > min);
        let frames: Vec<Vec<f64>> = clipped
            .iter()
            .map(|frame| {
                frame
                    .iter()
                    .map(|&v| {
                        let scaled = if degenerate {
                            if v.is_finite() {
                                0.0
                            } else {
                                v
                            }
                        } else {
                            (v - min) / (max - min) * (TARGET_MAX - TARGET_MIN) + TARGET_MIN
                        };
                        if scaled.is_nan() {
                            0.0
                        } else if scaled == f64::INFINITY {
                            TARGET_MAX
                        } else if scaled == f64::NEG_INFINITY {
                            TARGET_MIN
                        } else {
                            scaled
                        }
                    })
                    .collect()
            })
            .collect();

        if non_finite > 0 {
            debug!(cells = non_finite, "repaired non-finite spectrogram cells");
        }

        MelSpectrogram {
            frames,
            n_bands: self.n_bands,
        }
    }

    /// Pads the spectrogram up to the minimum frame count.
    ///
    /// When the matrix is shorter than [`MIN_FRAMES`], the target length is
    /// `max(MIN_FRAMES, text_len * 10)` and the final frame is repeated with
    /// small independent noise per cell so the tail is not perceptibly
    /// static. Padding values are clamped back into the synthesis range.
    /// Nothing happens when the floor is already met.
    pub fn extend(&mut self, text_len: usize, rng: &mut Pcg32) {
        if self.frames.len() >= MIN_FRAMES {
            return;
        }

        let target = MIN_FRAMES.max(text_len * 10);
        let last = self
            .frames
            .last()
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.n_bands]);

        debug!(
            from = self.frames.len(),
            to = target,
            "extending under-length spectrogram"
        );

        while self.frames.len() < target {
            let padded: Vec<f64> = last
                .iter()
                .map(|&v| {
                    let noise = (rng.gen::<f64>() * 2.0 - 1.0) * EXTENSION_NOISE;
                    (v + noise).clamp(TARGET_MIN, TARGET_MAX)
                })
                .collect();
            self.frames.push(padded);
        }
    }
}
