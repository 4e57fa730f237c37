//! Strategy selection with ordered fallback.
//!
//! The selector tries each synthesis strategy in priority order, validates
//! the buffer it returns, and falls through to the next on any failure. If
//! every strategy fails it emits silence of the expected duration instead of
//! propagating an error, so vocoding is a total function over sanitized
//! input.

use tracing::{debug, error, warn};

use crate::config::VocoderConfig;
use crate::rng::component_rng;
use crate::spectrogram::MelSpectrogram;
use crate::synthesis::harmonic_stack::HarmonicStackSynth;
use crate::synthesis::minimal::MinimalSynth;
use crate::synthesis::phoneme_formant::PhonemeFormantSynth;
use crate::synthesis::{StrategyKind, SynthesisStrategy};

/// Where the selector currently is in its attempt sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    /// No strategy has been attempted yet.
    Unattempted,
    /// Currently attempting the strategy at this priority index.
    Trying(usize),
    /// A strategy produced a validated buffer.
    Succeeded(StrategyKind),
    /// Every strategy failed; silence was emitted.
    ExhaustedFallback,
}

/// Outcome of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The strategy produced a validated buffer.
    Succeeded,
    /// The strategy errored or produced an invalid buffer.
    Failed(String),
}

/// Record of one strategy attempt, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisAttempt {
    /// Which strategy was attempted.
    pub kind: StrategyKind,
    /// How the attempt ended.
    pub outcome: AttemptOutcome,
}

/// Diagnostic summary of a selection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorReport {
    /// The strategy whose buffer was used, or `None` when every strategy
    /// failed and silence was emitted.
    pub strategy: Option<StrategyKind>,
    /// All attempts in priority order.
    pub attempts: Vec<SynthesisAttempt>,
}

/// Tries synthesis strategies in priority order.
pub struct Selector {
    strategies: Vec<Box<dyn SynthesisStrategy>>,
    state: SelectorState,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector {
    /// Creates a selector with the standard priority chain:
    /// phoneme-aware, then harmonic stack, then minimal.
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(PhonemeFormantSynth::default()),
            Box::new(HarmonicStackSynth::default()),
            Box::new(MinimalSynth::default()),
        ])
    }

    /// Creates a selector with a custom strategy chain.
    pub fn with_strategies(strategies: Vec<Box<dyn SynthesisStrategy>>) -> Self {
        Self {
            strategies,
            state: SelectorState::Unattempted,
        }
    }

    /// Current state of the attempt sequence.
    pub fn state(&self) -> SelectorState {
        self.state
    }

    /// Runs the chain and returns the first validated buffer.
    ///
    /// On total exhaustion, returns a zero-filled buffer of
    /// `num_frames * hop_length` samples and a report with no winning
    /// strategy.
    pub fn run(
        &mut self,
        mel: &MelSpectrogram,
        config: &VocoderConfig,
    ) -> (Vec<f64>, SelectorReport) {
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for (index, strategy) in self.strategies.iter().enumerate() {
            self.state = SelectorState::Trying(index);
            let kind = strategy.kind();
            let mut rng = component_rng(config.seed, kind.label());

            let failure = match strategy.synthesize(mel, config, &mut rng) {
                Ok(samples) => match validate_buffer(&samples) {
                    Ok(()) => {
                        self.state = SelectorState::Succeeded(kind);
                        attempts.push(SynthesisAttempt {
                            kind,
                            outcome: AttemptOutcome::Succeeded,
                        });
                        debug!(strategy = kind.label(), "synthesis succeeded");
                        return (
                            samples,
                            SelectorReport {
                                strategy: Some(kind),
                                attempts,
                            },
                        );
                    }
                    Err(reason) => reason,
                },
                Err(err) => err.to_string(),
            };

            warn!(
                strategy = kind.label(),
                reason = failure.as_str(),
                "synthesis strategy failed, falling back"
            );
            attempts.push(SynthesisAttempt {
                kind,
                outcome: AttemptOutcome::Failed(failure),
            });
        }

        // Every strategy failed. For sane inputs this indicates a defect
        // rather than bad data, so it gets the loudest diagnostic we have,
        // but the caller still receives a valid silent buffer.
        self.state = SelectorState::ExhaustedFallback;
        error!("all synthesis strategies failed; emitting silence");
        let samples = vec![0.0; mel.num_frames() * config.hop_length];
        (
            samples,
            SelectorReport {
                strategy: None,
                attempts,
            },
        )
    }
}

/// Structural validity check: non-empty and every sample finite.
fn validate_buffer(samples: &[f64]) -> Result<(), String> {
    if samples.is_empty() {
        return Err("empty buffer".to_string());
    }
    if let Some(pos) = samples.iter().position(|s| !s.is_finite()) {
        return Err(format!("non-finite sample at index {pos}"));
    }
    Ok(())
}
