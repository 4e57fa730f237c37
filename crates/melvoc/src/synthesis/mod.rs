//! Synthesis strategies for turning a sanitized spectrogram into audio.
//!
//! Each strategy implements the same contract behind [`SynthesisStrategy`]:
//! - `phoneme_formant` - phoneme-aware additive synthesis with formant
//!   resonances and articulation shaping
//! - `harmonic_stack` - filtered harmonic-stack synthesis with randomized
//!   phases and a lowpass smoothing stage
//! - `minimal` - bare 1st-3rd harmonic sine synthesis, the last line of
//!   defense
//!
//! Strategies never decide ordering themselves; the selector tries them in
//! priority order and validates whatever they return.

pub mod harmonic_stack;
pub mod minimal;
pub mod phoneme_formant;

use std::f64::consts::PI;
use std::fmt;

use rand_pcg::Pcg32;

use crate::config::VocoderConfig;
use crate::error::VocoderResult;
use crate::spectrogram::MelSpectrogram;

/// Identifies a synthesis strategy in reports and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Phoneme-aware additive synthesis.
    PhonemeFormant,
    /// Filtered harmonic-stack fallback.
    HarmonicStack,
    /// Minimal sine-harmonic fallback.
    Minimal,
}

impl StrategyKind {
    /// Stable label used for logs and RNG stream derivation.
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::PhonemeFormant => "phoneme_formant",
            StrategyKind::HarmonicStack => "harmonic_stack",
            StrategyKind::Minimal => "minimal",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Common contract for all synthesis strategies.
pub trait SynthesisStrategy {
    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Renders the whole spectrogram into samples.
    ///
    /// # Arguments
    /// * `mel` - Sanitized (and possibly extended) spectrogram
    /// * `config` - Sample rate, hop length and band expectations
    /// * `rng` - Deterministic RNG for any randomness
    ///
    /// # Returns
    /// One buffer of `num_frames * hop_length` samples, or an error the
    /// selector treats as a failed attempt.
    fn synthesize(
        &self,
        mel: &MelSpectrogram,
        config: &VocoderConfig,
        rng: &mut Pcg32,
    ) -> VocoderResult<Vec<f64>>;
}

/// Audibility floor for the per-frame energy proxy. Extension padding
/// (zero-centered noise) sits far below this, so padded tails stay silent.
pub(crate) const ENERGY_THRESHOLD: f64 = 0.05;

/// Frame energy relative to the mid-scale resting level.
///
/// Mean of the exponentiated band energies, minus one so an all-zero frame
/// measures exactly zero. Frames below [`ENERGY_THRESHOLD`] are treated as
/// unvoiced and rendered silent.
pub(crate) fn frame_energy(frame: &[f64]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    frame.iter().map(|v| v.exp()).sum::<f64>() / frame.len() as f64 - 1.0
}

/// Mean of a band range, zero for an empty range.
pub(crate) fn band_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Assembles per-frame buffers into one signal with a raised-cosine
/// crossfade at every frame boundary.
///
/// Each rendered frame may carry up to `xfade` extra tail samples beyond the
/// hop; the tail fades out while the next frame's head fades in, and the two
/// gains sum to one. Output length is exactly `frames.len() * hop`.
pub(crate) fn overlap_add(frames: &[Vec<f64>], hop: usize, xfade: usize) -> Vec<f64> {
    let mut out = vec![0.0; frames.len() * hop];

    for (idx, frame) in frames.iter().enumerate() {
        let start = idx * hop;
        for (j, &sample) in frame.iter().enumerate() {
            let pos = start + j;
            if pos >= out.len() {
                break;
            }
            let mut gain = 1.0;
            if xfade > 0 {
                if idx > 0 && j < xfade {
                    gain *= 0.5 * (1.0 - (PI * j as f64 / xfade as f64).cos());
                }
                if j >= hop {
                    let t = (j - hop) as f64 / xfade as f64;
                    gain *= 0.5 * (1.0 + (PI * t).cos());
                }
            }
            out[pos] += sample * gain;
        }
    }

    out
}

/// Scales the buffer so its peak sits at `target` (no-op for silence).
pub(crate) fn normalize_peak(samples: &mut [f64], target: f64) {
    let peak = samples.iter().map(|s| s.abs()).fold(0.0_f64, f64::max);
    if peak > 0.0 {
        let scale = target / peak;
        for sample in samples.iter_mut() {
            *sample *= scale;
        }
    }
}

/// Linear fade-in/fade-out over the given fraction of the buffer.
pub(crate) fn edge_fade(samples: &mut [f64], fraction: f64) {
    let fade = (samples.len() as f64 * fraction) as usize;
    if fade == 0 {
        return;
    }
    let len = samples.len();
    for i in 0..fade.min(len) {
        let gain = i as f64 / fade as f64;
        samples[i] *= gain;
        samples[len - 1 - i] *= gain;
    }
}
