//! Public vocoding entry point.
//!
//! Wires the stages together in strict downstream order: shape validation,
//! sanitization, length extension, strategy selection, and a final peak
//! limit on the assembled waveform.

use tracing::debug;

use crate::config::VocoderConfig;
use crate::error::{VocoderError, VocoderResult};
use crate::rng::component_rng;
use crate::selector::{Selector, SelectorReport};
use crate::spectrogram::MelSpectrogram;

/// Peak bound of the final output buffer.
const PEAK_LIMIT: f64 = 0.8;

/// Synthesized audio at a fixed sample rate.
///
/// Every sample is finite and the peak amplitude never exceeds 0.8, so the
/// buffer is safe to hand directly to PCM encoding or playback.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformBuffer {
    /// Sample amplitudes.
    pub samples: Vec<f64>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl WaveformBuffer {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Result of one vocoding request.
#[derive(Debug, Clone)]
pub struct VocodeOutput {
    /// The synthesized audio.
    pub waveform: WaveformBuffer,
    /// Which strategy produced it, and how the attempts went.
    pub report: SelectorReport,
}

/// Converts a mel spectrogram into a waveform.
///
/// # Arguments
/// * `frames` - Frames-by-bands matrix; values may be arbitrary floats
///   including NaN and infinity
/// * `text_len` - Source text length, used only to size the minimum output
///   duration for under-length spectrograms
/// * `config` - Sample rate, hop length, band count and seed
///
/// # Returns
/// A non-empty, all-finite waveform plus a diagnostic report. Errors occur
/// only for structurally invalid input (empty or ragged matrix, band count
/// differing from the config) or an invalid config; degenerate values never
/// fail, they degrade to silence at worst.
pub fn vocode(
    frames: Vec<Vec<f64>>,
    text_len: usize,
    config: &VocoderConfig,
) -> VocoderResult<VocodeOutput> {
    config.validate()?;

    let mel = MelSpectrogram::new(frames)?;
    if mel.num_bands() != config.n_mels {
        return Err(VocoderError::invalid_param(
            "n_mels",
            format!("expected {} bands, got {}", config.n_mels, mel.num_bands()),
        ));
    }

    debug!(
        frames = mel.num_frames(),
        bands = mel.num_bands(),
        text_len,
        "vocoding request"
    );

    let mut mel = mel.sanitize();
    let mut extend_rng = component_rng(config.seed, "extend");
    mel.extend(text_len, &mut extend_rng);

    let mut selector = Selector::new();
    let (mut samples, report) = selector.run(&mel, config);
    limit_peak(&mut samples, PEAK_LIMIT);

    Ok(VocodeOutput {
        waveform: WaveformBuffer {
            samples,
            sample_rate: config.sample_rate,
        },
        report,
    })
}

/// Rescales the buffer only when its peak exceeds the limit.
fn limit_peak(samples: &mut [f64], limit: f64) {
    let peak = samples.iter().map(|s| s.abs()).fold(0.0_f64, f64::max);
    if peak > limit {
        let scale = limit / peak;
        for sample in samples.iter_mut() {
            *sample *= scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_peak_only_scales_down() {
        let mut loud = vec![0.0, 1.6, -2.0];
        limit_peak(&mut loud, 0.8);
        assert!((loud[2] + 0.8).abs() < 1e-12);

        let mut quiet = vec![0.0, 0.1, -0.2];
        limit_peak(&mut quiet, 0.8);
        assert_eq!(quiet, vec![0.0, 0.1, -0.2]);
    }

    #[test]
    fn test_rejects_band_count_mismatch() {
        let config = VocoderConfig::default();
        let err = vocode(vec![vec![0.0; 40]; 60], 0, &config).unwrap_err();
        assert!(matches!(err, VocoderError::InvalidParameter { .. }));
    }

    #[test]
    fn test_waveform_duration() {
        let buffer = WaveformBuffer {
            samples: vec![0.0; 22050],
            sample_rate: 22050,
        };
        assert!((buffer.duration_seconds() - 1.0).abs() < 1e-12);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.len(), 22050);
    }
}
