#![no_main]

use libfuzzer_sys::fuzz_target;
use melvoc::{vocode, VocoderConfig};

// Arbitrary bytes become an arbitrary-float matrix: vocoding must accept any
// value pathology (NaN, infinities, wild magnitudes) without panicking and
// without leaking non-finite samples.
fuzz_target!(|data: &[u8]| {
    const BANDS: usize = 16;
    const MAX_FRAMES: usize = 64;

    let cells: Vec<f64> = data
        .chunks_exact(8)
        .take(BANDS * MAX_FRAMES)
        .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
        .collect();
    if cells.len() < BANDS {
        return;
    }

    let frames: Vec<Vec<f64>> = cells.chunks_exact(BANDS).map(|f| f.to_vec()).collect();
    let text_len = data.len() % 8;
    let config = VocoderConfig {
        n_mels: BANDS,
        ..Default::default()
    };

    let output = vocode(frames, text_len, &config).unwrap();
    assert!(!output.waveform.is_empty());
    assert!(output.waveform.samples.iter().all(|s| s.is_finite()));
});
