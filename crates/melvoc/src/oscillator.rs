//! Low-level waveform primitives shared by the synthesis strategies.

use rand::Rng;
use rand_pcg::Pcg32;

/// Full circle in radians.
pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;

/// Generates centered white noise in [-1.0, 1.0].
pub fn white_noise(rng: &mut Pcg32, num_samples: usize) -> Vec<f64> {
    (0..num_samples).map(|_| rng.gen::<f64>() * 2.0 - 1.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    #[test]
    fn test_white_noise_range() {
        let mut rng = seeded_rng(42);
        let noise = white_noise(&mut rng, 1000);
        assert_eq!(noise.len(), 1000);
        for &s in &noise {
            assert!((-1.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_white_noise_is_centered() {
        let mut rng = seeded_rng(7);
        let noise = white_noise(&mut rng, 10_000);
        let mean = noise.iter().sum::<f64>() / noise.len() as f64;
        assert!(mean.abs() < 0.05);
    }
}
