//! Vocoder configuration parameters.

use serde::{Deserialize, Serialize};

use crate::error::{VocoderError, VocoderResult};

/// Parameters shared by every synthesis strategy.
///
/// All fields have recognized defaults so a config can be deserialized from
/// an empty JSON object. Callers should run [`VocoderConfig::validate`]
/// before synthesis; [`crate::vocode`] does so on their behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VocoderConfig {
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Samples per spectrogram frame (frame duration = hop_length / sample_rate).
    #[serde(default = "default_hop_length")]
    pub hop_length: usize,
    /// Expected number of mel bands per frame.
    #[serde(default = "default_n_mels")]
    pub n_mels: usize,
    /// Base seed for all deterministic random streams.
    #[serde(default)]
    pub seed: u32,
}

fn default_sample_rate() -> u32 {
    22050
}

fn default_hop_length() -> usize {
    256
}

fn default_n_mels() -> usize {
    80
}

impl Default for VocoderConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            hop_length: default_hop_length(),
            n_mels: default_n_mels(),
            seed: 0,
        }
    }
}

impl VocoderConfig {
    /// Checks that the parameters describe a usable synthesis setup.
    pub fn validate(&self) -> VocoderResult<()> {
        if !(16_000..=48_000).contains(&self.sample_rate) {
            return Err(VocoderError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        if self.hop_length == 0 {
            return Err(VocoderError::invalid_param("hop_length", "must be nonzero"));
        }
        if self.n_mels == 0 {
            return Err(VocoderError::invalid_param("n_mels", "must be nonzero"));
        }
        Ok(())
    }

    /// Number of samples blended between adjacent frames (about 5 ms,
    /// capped at one hop).
    pub fn crossfade_samples(&self) -> usize {
        ((self.sample_rate as f64 * 0.005) as usize).min(self.hop_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = VocoderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sample_rate, 22050);
        assert_eq!(config.hop_length, 256);
        assert_eq!(config.n_mels, 80);
    }

    #[test]
    fn test_rejects_out_of_class_sample_rate() {
        let config = VocoderConfig {
            sample_rate: 8000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(VocoderError::InvalidSampleRate { rate: 8000 })
        ));
    }

    #[test]
    fn test_rejects_zero_hop() {
        let config = VocoderConfig {
            hop_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let config: VocoderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, VocoderConfig::default());

        let config: VocoderConfig = serde_json::from_str(r#"{"sample_rate": 48000}"#).unwrap();
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.hop_length, 256);
    }

    #[test]
    fn test_crossfade_shorter_than_hop() {
        let config = VocoderConfig::default();
        assert!(config.crossfade_samples() <= config.hop_length);
        assert!(config.crossfade_samples() > 0);
    }
}
