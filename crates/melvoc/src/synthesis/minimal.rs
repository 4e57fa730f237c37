//! Minimal sine-harmonic synthesis, the last line of defense.
//!
//! Uses no randomness and no filters: voiced frames get the first three
//! harmonics of a low-band pitch estimate, everything else is silence. For
//! finite, bounded input this cannot fail.

use rand_pcg::Pcg32;

use crate::config::VocoderConfig;
use crate::error::VocoderResult;
use crate::oscillator::TWO_PI;
use crate::spectrogram::MelSpectrogram;

use super::{
    band_mean, frame_energy, normalize_peak, overlap_add, StrategyKind, SynthesisStrategy,
    ENERGY_THRESHOLD,
};

/// Peak amplitude of the assembled buffer.
const OUTPUT_PEAK: f64 = 0.3;

/// Bare-bones harmonic synthesizer.
#[derive(Debug, Clone)]
pub struct MinimalSynth {
    /// Base voice frequency in Hz.
    pub f0_base: f64,
    /// Frames with an energy proxy below this render as silence.
    pub energy_threshold: f64,
}

impl Default for MinimalSynth {
    fn default() -> Self {
        Self {
            f0_base: 150.0,
            energy_threshold: ENERGY_THRESHOLD,
        }
    }
}

impl SynthesisStrategy for MinimalSynth {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Minimal
    }

    fn synthesize(
        &self,
        mel: &MelSpectrogram,
        config: &VocoderConfig,
        _rng: &mut Pcg32,
    ) -> VocoderResult<Vec<f64>> {
        let hop = config.hop_length;
        let xfade = config.crossfade_samples();
        let frame_len = hop + xfade;
        let sample_rate = config.sample_rate as f64;
        let nyquist = sample_rate / 2.0;
        let n_bands = mel.num_bands();

        let mut rendered = Vec::with_capacity(mel.num_frames());
        for frame in mel.frames() {
            if frame_energy(frame) < self.energy_threshold {
                rendered.push(vec![0.0; frame_len]);
                continue;
            }

            let low_count = (n_bands / 10).max(1).min(frame.len());
            let low_energy = band_mean(&frame[..low_count]);
            let f0 = (self.f0_base * (1.0 + low_energy / 10.0)).clamp(80.0, 400.0);

            let mut buf = vec![0.0; frame_len];
            for harmonic in 1..=3usize {
                let freq = f0 * harmonic as f64;
                if freq >= nyquist {
                    break;
                }
                let bin = (harmonic * n_bands / 10).min(n_bands - 1);
                let amplitude = (frame[bin] / 4.0).exp().clamp(0.0, 1.0) / harmonic as f64;
                for (i, sample) in buf.iter_mut().enumerate() {
                    let t = i as f64 / sample_rate;
                    *sample += amplitude * (TWO_PI * freq * t).sin();
                }
            }
            rendered.push(buf);
        }

        let mut out = overlap_add(&rendered, hop, xfade);
        normalize_peak(&mut out, OUTPUT_PEAK);
        Ok(out)
    }
}
