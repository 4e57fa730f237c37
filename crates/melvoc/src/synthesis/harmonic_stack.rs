//! Filtered harmonic-stack fallback synthesis.
//!
//! A simpler strategy than the phoneme-aware path: per-frame pitch is
//! estimated from the low bands, harmonics 2-5 are stacked with randomized
//! phases to avoid buzzy periodicity, broadband noise fills the spectrum,
//! and a 4th-order lowpass removes aliasing harshness.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::VocoderConfig;
use crate::error::VocoderResult;
use crate::filter::Butterworth4;
use crate::oscillator::TWO_PI;
use crate::spectrogram::MelSpectrogram;

use super::{
    edge_fade, frame_energy, normalize_peak, overlap_add, StrategyKind, SynthesisStrategy,
    ENERGY_THRESHOLD,
};

/// Peak amplitude of the assembled buffer.
const OUTPUT_PEAK: f64 = 0.7;

/// Fraction of the buffer faded at each edge.
const EDGE_FADE: f64 = 0.02;

/// Harmonic-stack synthesizer with post-filtering.
#[derive(Debug, Clone)]
pub struct HarmonicStackSynth {
    /// Broadband noise level mixed into voiced frames.
    pub noise_level: f64,
    /// Lowpass cutoff in Hz (clamped below Nyquist at low sample rates).
    pub lowpass_cutoff: f64,
    /// Frames with an energy proxy below this render as silence.
    pub energy_threshold: f64,
}

impl Default for HarmonicStackSynth {
    fn default() -> Self {
        Self {
            noise_level: 0.01,
            lowpass_cutoff: 8000.0,
            energy_threshold: ENERGY_THRESHOLD,
        }
    }
}

impl SynthesisStrategy for HarmonicStackSynth {
    fn kind(&self) -> StrategyKind {
        StrategyKind::HarmonicStack
    }

    fn synthesize(
        &self,
        mel: &MelSpectrogram,
        config: &VocoderConfig,
        rng: &mut Pcg32,
    ) -> VocoderResult<Vec<f64>> {
        let hop = config.hop_length;
        let xfade = config.crossfade_samples();
        let frame_len = hop + xfade;
        let sample_rate = config.sample_rate as f64;
        let nyquist = sample_rate / 2.0;
        let n_bands = mel.num_bands();

        let f0_track = self.estimate_f0_track(mel);

        let mut rendered = Vec::with_capacity(mel.num_frames());
        for (frame, &f0) in mel.frames().iter().zip(&f0_track) {
            if f0 <= 0.0 {
                rendered.push(vec![0.0; frame_len]);
                continue;
            }

            let mut buf = vec![0.0; frame_len];
            for harmonic in 2..=5usize {
                let freq = f0 * harmonic as f64;
                if freq >= nyquist {
                    break;
                }
                let bin = ((freq * n_bands as f64 / nyquist) as usize).min(n_bands - 1);
                let amplitude =
                    (frame[bin] / 8.0).exp().clamp(0.0, 1.0) / (harmonic as f64).powf(1.5) * 0.2;
                let phase = rng.gen::<f64>() * TWO_PI;
                for (i, sample) in buf.iter_mut().enumerate() {
                    let t = i as f64 / sample_rate;
                    *sample += amplitude * (TWO_PI * freq * t + phase).sin();
                }
            }
            for sample in buf.iter_mut() {
                *sample += (rng.gen::<f64>() * 2.0 - 1.0) * self.noise_level;
            }
            rendered.push(buf);
        }

        let mut out = overlap_add(&rendered, hop, xfade);

        let cutoff = self.lowpass_cutoff.min(0.45 * sample_rate);
        let mut lowpass = Butterworth4::lowpass(cutoff, sample_rate);
        lowpass.process_buffer(&mut out);

        normalize_peak(&mut out, OUTPUT_PEAK);
        edge_fade(&mut out, EDGE_FADE);
        Ok(out)
    }
}

impl HarmonicStackSynth {
    /// Per-frame pitch estimate from the low-band energy peak.
    ///
    /// Unvoiced frames get 0. Octave-style jumps larger than 50 Hz between
    /// adjacent voiced frames are averaged against the previous estimate.
    fn estimate_f0_track(&self, mel: &MelSpectrogram) -> Vec<f64> {
        let n_bands = mel.num_bands();
        let low_count = (n_bands * 3 / 8).max(1).min(n_bands);

        let mut track = Vec::with_capacity(mel.num_frames());
        let mut prev = 0.0;
        for frame in mel.frames() {
            if frame_energy(frame) < self.energy_threshold {
                track.push(0.0);
                continue;
            }

            let low = &frame[..low_count];
            let argmax = low
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let mut f0 = 80.0 + argmax as f64 * 640.0 / n_bands as f64;
            if prev > 0.0 && (f0 - prev).abs() > 50.0 {
                f0 = (f0 + prev) / 2.0;
            }
            prev = f0;
            track.push(f0);
        }
        track
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    fn voiced_matrix(frames: usize) -> MelSpectrogram {
        let frame: Vec<f64> = (0..80)
            .map(|i| if i == 10 { 3.5 } else { 0.5 })
            .collect();
        MelSpectrogram::new(vec![frame; frames]).unwrap()
    }

    #[test]
    fn test_silent_input_renders_silence() {
        let mel = MelSpectrogram::new(vec![vec![0.0; 80]; 8]).unwrap();
        let synth = HarmonicStackSynth::default();
        let config = VocoderConfig::default();
        let out = synth
            .synthesize(&mel, &config, &mut seeded_rng(42))
            .unwrap();

        assert_eq!(out.len(), 8 * config.hop_length);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_voiced_output_is_bounded_and_finite() {
        let mel = voiced_matrix(12);
        let synth = HarmonicStackSynth::default();
        let config = VocoderConfig::default();
        let out = synth
            .synthesize(&mel, &config, &mut seeded_rng(42))
            .unwrap();

        assert_eq!(out.len(), 12 * config.hop_length);
        assert!(out.iter().all(|s| s.is_finite()));
        let peak = out.iter().map(|s| s.abs()).fold(0.0_f64, f64::max);
        assert!(peak <= OUTPUT_PEAK + 1e-9);
        assert!(peak > 0.0);
    }

    #[test]
    fn test_f0_track_marks_unvoiced_frames() {
        let mut rows = vec![vec![0.0; 80]; 4];
        rows[1] = (0..80).map(|i| if i == 10 { 3.5 } else { 0.5 }).collect();
        let mel = MelSpectrogram::new(rows).unwrap();
        let synth = HarmonicStackSynth::default();

        let track = synth.estimate_f0_track(&mel);
        assert_eq!(track[0], 0.0);
        assert!(track[1] > 0.0);
        assert_eq!(track[2], 0.0);
    }

    #[test]
    fn test_f0_smoothing_limits_jumps() {
        let mut rows = Vec::new();
        // Peak at band 0 (~80 Hz) then band 20 (~240 Hz): a 160 Hz jump.
        rows.push((0..80).map(|i| if i == 0 { 3.5 } else { 0.5 }).collect());
        rows.push((0..80).map(|i| if i == 20 { 3.5 } else { 0.5 }).collect());
        let mel = MelSpectrogram::new(rows).unwrap();
        let synth = HarmonicStackSynth::default();

        let track = synth.estimate_f0_track(&mel);
        assert!((track[0] - 80.0).abs() < 1e-9);
        // Averaged against the previous frame instead of jumping outright.
        assert!((track[1] - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_different_seeds_produce_different_phases() {
        let mel = voiced_matrix(12);
        let synth = HarmonicStackSynth::default();
        let config = VocoderConfig::default();

        let a = synth.synthesize(&mel, &config, &mut seeded_rng(1)).unwrap();
        let b = synth.synthesize(&mel, &config, &mut seeded_rng(2)).unwrap();
        assert_ne!(a, b);
    }
}
