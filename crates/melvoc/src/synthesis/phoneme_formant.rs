//! Phoneme-aware additive synthesis.
//!
//! Each voiced frame is classified into a phoneme, then rendered as the sum
//! of three band-limited formant resonances, a small harmonic stack on the
//! estimated voice frequency, and one articulation-specific enhancement
//! (burst transient, fricative noise, nasal resonance, breath noise, or
//! onset/offset smoothing for liquids and glides).

use rand_pcg::Pcg32;

use crate::config::VocoderConfig;
use crate::error::VocoderResult;
use crate::filter::BiquadFilter;
use crate::oscillator::{white_noise, TWO_PI};
use crate::phoneme::{classify_frame, Articulation, PhonemeProfile};
use crate::spectrogram::MelSpectrogram;

use super::{
    band_mean, frame_energy, normalize_peak, overlap_add, StrategyKind, SynthesisStrategy,
    ENERGY_THRESHOLD,
};

/// Nasal cavity resonance added for nasal phonemes.
const NASAL_RESONANCE_HZ: f64 = 1000.0;

/// Peak amplitude of the assembled buffer.
const OUTPUT_PEAK: f64 = 0.35;

/// Additive synthesizer driven by per-frame phoneme classification.
#[derive(Debug, Clone)]
pub struct PhonemeFormantSynth {
    /// Base voice frequency in Hz before the profile modifier, tuned for a
    /// typical adult speaker.
    pub f0_base: f64,
    /// Frames with an energy proxy below this render as silence.
    pub energy_threshold: f64,
}

impl Default for PhonemeFormantSynth {
    fn default() -> Self {
        Self {
            f0_base: 150.0,
            energy_threshold: ENERGY_THRESHOLD,
        }
    }
}

impl SynthesisStrategy for PhonemeFormantSynth {
    fn kind(&self) -> StrategyKind {
        StrategyKind::PhonemeFormant
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
        let n_bands = mel.num_bands();

        let mut rendered = Vec::with_capacity(mel.num_frames());
        for frame in mel.frames() {
            if frame_energy(frame) < self.energy_threshold {
                rendered.push(vec![0.0; frame_len]);
                continue;
            }
            rendered.push(self.render_voiced_frame(frame, frame_len, n_bands, sample_rate, rng));
        }

        let mut out = overlap_add(&rendered, hop, xfade);
        normalize_peak(&mut out, OUTPUT_PEAK);
        Ok(out)
    }
}

impl PhonemeFormantSynth {
    fn render_voiced_frame(
        &self,
        frame: &[f64],
        frame_len: usize,
        n_bands: usize,
        sample_rate: f64,
        rng: &mut Pcg32,
    ) -> Vec<f64> {
        let phoneme = classify_frame(frame);
        let profile = phoneme.profile();

        // Voice frequency from the low bands (roughly the bottom 1.2 kHz),
        // clamped to the physiologically plausible range.
        let low_count = (n_bands * 3 / 20).max(1).min(frame.len());
        let low_energy = band_mean(&frame[..low_count]);
        let f0 = (self.f0_base * profile.f0_scale * (1.0 + low_energy / 8.0)).clamp(80.0, 400.0);

        let mut buf = vec![0.0; frame_len];
        add_formant_resonances(&mut buf, frame, &profile, n_bands, sample_rate);
        add_voiced_harmonics(&mut buf, frame, f0, n_bands, sample_rate);
        if let Some(articulation) = profile.articulation {
            apply_articulation(&mut buf, articulation, frame, n_bands, sample_rate, rng);
        }

        let gain = profile.energy.gain();
        for sample in buf.iter_mut() {
            *sample *= gain;
        }
        buf
    }
}

/// Adds the three formant resonances of the profile.
///
/// Each formant contributes three partials spread across its bandwidth, with
/// amplitude taken from the mel band covering the formant frequency.
fn add_formant_resonances(
    buf: &mut [f64],
    frame: &[f64],
    profile: &PhonemeProfile,
    n_bands: usize,
    sample_rate: f64,
) {
    let nyquist = sample_rate / 2.0;
    for &formant in &profile.formants {
        if formant >= nyquist {
            continue;
        }
        let bin = ((formant * n_bands as f64 / nyquist) as usize).min(n_bands - 1);
        let amplitude = ((frame[bin] / 12.0).exp() * 0.08).clamp(0.0, 0.2);
        let bandwidth = formant * 0.08;

        for offset in [-bandwidth / 2.0, 0.0, bandwidth / 2.0] {
            let freq = formant + offset;
            if freq <= 0.0 || freq >= nyquist {
                continue;
            }
            for (i, sample) in buf.iter_mut().enumerate() {
                let t = i as f64 / sample_rate;
                *sample += amplitude / 3.0 * (TWO_PI * freq * t).sin();
            }
        }
    }
}

/// Adds harmonics 1-5 of the voice frequency, each weighted by the mel band
/// it falls into.
fn add_voiced_harmonics(
    buf: &mut [f64],
    frame: &[f64],
    f0: f64,
    n_bands: usize,
    sample_rate: f64,
) {
    let nyquist = sample_rate / 2.0;
    for harmonic in 1..=5usize {
        let freq = f0 * harmonic as f64;
        if freq >= nyquist {
            break;
        }
        let bin = (harmonic * n_bands / 8).min(n_bands - 1);
        let amplitude = ((frame[bin] / 15.0).exp() / (harmonic as f64).powf(0.7)).clamp(0.0, 0.15);
        for (i, sample) in buf.iter_mut().enumerate() {
            let t = i as f64 / sample_rate;
            *sample += amplitude * (TWO_PI * freq * t).sin();
        }
    }
}

/// Applies the single articulation enhancement for this frame.
fn apply_articulation(
    buf: &mut [f64],
    articulation: Articulation,
    frame: &[f64],
    n_bands: usize,
    sample_rate: f64,
    rng: &mut Pcg32,
) {
    match articulation {
        Articulation::Burst => {
            // Short broadband transient at frame onset.
            let len = (buf.len() / 10).max(1).min(buf.len());
            let noise = white_noise(rng, len);
            for (sample, n) in buf.iter_mut().zip(noise) {
                *sample += n * 0.05;
            }
        }
        Articulation::Fricative => {
            // Sustained noise band-limited above ~2 kHz.
            let mut filter = BiquadFilter::highpass(2000.0, 0.707, sample_rate);
            let noise = white_noise(rng, buf.len());
            for (sample, n) in buf.iter_mut().zip(noise) {
                *sample += filter.process(n) * 0.03;
            }
        }
        Articulation::Nasal => {
            let low_count = (n_bands / 4).max(1).min(frame.len());
            let amplitude = ((band_mean(&frame[..low_count]) / 15.0).exp() * 0.05).clamp(0.0, 0.1);
            for (i, sample) in buf.iter_mut().enumerate() {
                let t = i as f64 / sample_rate;
                *sample += amplitude * (TWO_PI * NASAL_RESONANCE_HZ * t).sin();
            }
        }
        Articulation::Breath => {
            let noise = white_noise(rng, buf.len());
            for (sample, n) in buf.iter_mut().zip(noise) {
                *sample += n * 0.02;
            }
        }
        Articulation::Liquid | Articulation::Glide => {
            smooth_edges(buf);
        }
        // Stops carry no extra excitation beyond their formants.
        Articulation::Plosive => {}
    }
}

/// Raised-cosine onset/offset ramp over the outer fifth of the frame.
fn smooth_edges(buf: &mut [f64]) {
    use std::f64::consts::PI;

    let ramp = buf.len() / 5;
    if ramp == 0 {
        return;
    }
    let len = buf.len();
    for i in 0..ramp {
        let gain = 0.5 * (1.0 - (PI * i as f64 / ramp as f64).cos());
        buf[i] *= gain;
        buf[len - 1 - i] *= gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    fn voiced_matrix(frames: usize) -> MelSpectrogram {
        // Low-band dominant content, comfortably above the energy gate.
        let frame: Vec<f64> = (0..80)
            .map(|i| if i < 15 { 3.0 } else { -1.0 })
            .collect();
        MelSpectrogram::new(vec![frame; frames]).unwrap()
    }

    #[test]
    fn test_silent_input_renders_silence() {
        let mel = MelSpectrogram::new(vec![vec![0.0; 80]; 10]).unwrap();
        let synth = PhonemeFormantSynth::default();
        let config = VocoderConfig::default();
        let out = synth
            .synthesize(&mel, &config, &mut seeded_rng(42))
            .unwrap();

        assert_eq!(out.len(), 10 * config.hop_length);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_voiced_input_renders_audio() {
        let mel = voiced_matrix(10);
        let synth = PhonemeFormantSynth::default();
        let config = VocoderConfig::default();
        let out = synth
            .synthesize(&mel, &config, &mut seeded_rng(42))
            .unwrap();

        assert_eq!(out.len(), 10 * config.hop_length);
        let peak = out.iter().map(|s| s.abs()).fold(0.0_f64, f64::max);
        assert!((peak - OUTPUT_PEAK).abs() < 1e-9);
        assert!(out.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_determinism() {
        let mel = voiced_matrix(20);
        let synth = PhonemeFormantSynth::default();
        let config = VocoderConfig::default();

        let a = synth.synthesize(&mel, &config, &mut seeded_rng(7)).unwrap();
        let b = synth.synthesize(&mel, &config, &mut seeded_rng(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_smooth_edges_tapers_to_zero() {
        let mut buf = vec![1.0; 50];
        smooth_edges(&mut buf);
        assert_eq!(buf[0], 0.0);
        assert_eq!(buf[49], 0.0);
        assert_eq!(buf[25], 1.0);
    }

    #[test]
    fn test_mixed_voicing_keeps_silent_regions_quiet() {
        let mut rows = vec![vec![0.0; 80]; 6];
        rows[0] = (0..80).map(|i| if i < 15 { 3.0 } else { -1.0 }).collect();
        let mel = MelSpectrogram::new(rows).unwrap();
        let config = VocoderConfig::default();
        let synth = PhonemeFormantSynth::default();
        let out = synth
            .synthesize(&mel, &config, &mut seeded_rng(42))
            .unwrap();

        // Frames far from the single voiced frame stay exactly silent.
        let tail_start = 3 * config.hop_length;
        assert!(out[tail_start..].iter().all(|&s| s == 0.0));
    }
}
