//! Band-energy phoneme heuristic.

use super::Phoneme;

/// Mean mid-band level (sanitized domain) separating the close /u/ from the
/// open /o/ when low bands dominate.
const U_MID_THRESHOLD: f64 = -2.0;

/// Classifies a sanitized frame into a phoneme symbol.
///
/// The bands are split into three contiguous ranges: low (first 3/16 of
/// bands, roughly 0-1.5 kHz on an 80-band mel scale), mid (up to half the
/// bands, roughly 1.5-4 kHz) and high (the rest). Classification compares
/// the three range means:
///
/// - high dominant with strong mids reads as /i/, otherwise as the
///   fricative-colored /shi/
/// - low dominant reads as /u/ when the mids are quiet, /o/ otherwise
/// - mid dominant reads as /e/
/// - ties and everything else read as the open /a/
///
/// This is a coarse heuristic, not a trained classifier; it is total and
/// deterministic over every possible frame.
pub fn classify_frame(frame: &[f64]) -> Phoneme {
    let n = frame.len();
    let low_end = n * 3 / 16;
    let mid_end = n / 2;

    let low = range_mean(&frame[..low_end]);
    let mid = range_mean(&frame[low_end..mid_end]);
    let high = range_mean(&frame[mid_end..]);

    if high > mid && high > low {
        if mid > low {
            Phoneme::I
        } else {
            Phoneme::Shi
        }
    } else if low > mid && low > high {
        if mid < U_MID_THRESHOLD {
            Phoneme::U
        } else {
            Phoneme::O
        }
    } else if mid > low && mid > high {
        Phoneme::E
    } else {
        Phoneme::A
    }
}

fn range_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 80-band frame with the given mean level per range.
    fn frame(low: f64, mid: f64, high: f64) -> Vec<f64> {
        let mut bands = vec![low; 15];
        bands.extend(vec![mid; 25]);
        bands.extend(vec![high; 40]);
        bands
    }

    #[test]
    fn test_high_dominant_with_mids_is_i() {
        assert_eq!(classify_frame(&frame(-2.0, 1.0, 3.0)), Phoneme::I);
    }

    #[test]
    fn test_high_dominant_without_mids_is_shi() {
        assert_eq!(classify_frame(&frame(1.0, -1.0, 3.0)), Phoneme::Shi);
    }

    #[test]
    fn test_low_dominant_quiet_mids_is_u() {
        assert_eq!(classify_frame(&frame(2.0, -3.0, -3.5)), Phoneme::U);
    }

    #[test]
    fn test_low_dominant_with_mids_is_o() {
        assert_eq!(classify_frame(&frame(2.0, 0.0, -1.0)), Phoneme::O);
    }

    #[test]
    fn test_mid_dominant_is_e() {
        assert_eq!(classify_frame(&frame(-1.0, 2.0, 0.0)), Phoneme::E);
    }

    #[test]
    fn test_flat_frame_is_default_a() {
        assert_eq!(classify_frame(&vec![0.0; 80]), Phoneme::A);
        assert_eq!(classify_frame(&vec![-4.0; 80]), Phoneme::A);
    }

    #[test]
    fn test_tiny_frame_is_total() {
        // Degenerate band counts still classify without panicking.
        assert_eq!(classify_frame(&[1.0]), Phoneme::Shi);
        classify_frame(&[0.0, 0.0]);
    }
}
