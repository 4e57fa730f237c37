//! Acoustic profile table.
//!
//! Formant targets follow published measurements for Japanese adult speech,
//! lightly adjusted per consonant row. The table is pure data reachable only
//! through [`Phoneme::profile`], so it needs no initialization or locking.

use super::Phoneme;

/// Relative loudness tier of a phoneme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyClass {
    /// Quiet phonemes (close vowels, the moraic nasal).
    Low,
    /// The common case.
    Medium,
    /// Loud open-vowel rows.
    High,
}

impl EnergyClass {
    /// Output gain applied to a synthesized frame of this class.
    pub fn gain(self) -> f64 {
        match self {
            EnergyClass::Low => 0.85,
            EnergyClass::Medium => 1.0,
            EnergyClass::High => 1.1,
        }
    }
}

/// Articulation character of a consonant row.
///
/// Each phoneme carries at most one, and the synthesizer applies at most one
/// matching enhancement per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Articulation {
    /// Short broadband transient at frame onset (k-row).
    Burst,
    /// Sustained high-band noise (s-row).
    Fricative,
    /// Stop consonant (t-row); no extra excitation beyond the formants.
    Plosive,
    /// Extra low resonance (n-row, m-row, moraic nasal).
    Nasal,
    /// Low-amplitude broadband noise (h-row).
    Breath,
    /// Smoothed onset/offset (r-row).
    Liquid,
    /// Smoothed onset/offset (y-row, w-row).
    Glide,
}

/// Immutable acoustic targets for one phoneme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhonemeProfile {
    /// First three formant center frequencies in Hz.
    pub formants: [f64; 3],
    /// Multiplier applied to the base voice frequency.
    pub f0_scale: f64,
    /// Loudness tier.
    pub energy: EnergyClass,
    /// Articulation character, if any.
    pub articulation: Option<Articulation>,
}

const fn profile(
    formants: [f64; 3],
    f0_scale: f64,
    energy: EnergyClass,
    articulation: Option<Articulation>,
) -> PhonemeProfile {
    PhonemeProfile {
        formants,
        f0_scale,
        energy,
        articulation,
    }
}

impl Phoneme {
    /// Looks up the acoustic profile for this phoneme.
    pub fn profile(self) -> PhonemeProfile {
        use Articulation::*;
        use EnergyClass::*;

        match self {
            Phoneme::A => profile([730.0, 1090.0, 2440.0], 1.0, High, None),
            Phoneme::I => profile([270.0, 2290.0, 3010.0], 1.1, Medium, None),
            Phoneme::U => profile([300.0, 870.0, 2240.0], 0.9, Low, None),
            Phoneme::E => profile([530.0, 1840.0, 2480.0], 1.0, Medium, None),
            Phoneme::O => profile([570.0, 840.0, 2410.0], 0.95, Medium, None),

            Phoneme::Ka => profile([730.0, 1200.0, 2400.0], 1.0, High, Some(Burst)),
            Phoneme::Ki => profile([270.0, 2400.0, 3100.0], 1.1, Medium, Some(Burst)),
            Phoneme::Ku => profile([300.0, 900.0, 2200.0], 0.9, Low, Some(Burst)),
            Phoneme::Ke => profile([530.0, 1900.0, 2500.0], 1.0, Medium, Some(Burst)),
            Phoneme::Ko => profile([570.0, 900.0, 2400.0], 0.95, Medium, Some(Burst)),

            Phoneme::Sa => profile([730.0, 1200.0, 2600.0], 1.0, High, Some(Fricative)),
            Phoneme::Shi => profile([300.0, 2200.0, 3200.0], 1.1, Medium, Some(Fricative)),
            Phoneme::Su => profile([300.0, 900.0, 2400.0], 0.9, Low, Some(Fricative)),
            Phoneme::Se => profile([530.0, 1900.0, 2600.0], 1.0, Medium, Some(Fricative)),
            Phoneme::So => profile([570.0, 900.0, 2500.0], 0.95, Medium, Some(Fricative)),

            Phoneme::Ta => profile([730.0, 1200.0, 2400.0], 1.0, High, Some(Plosive)),
            Phoneme::Chi => profile([300.0, 2100.0, 3000.0], 1.1, Medium, Some(Plosive)),
            Phoneme::Tsu => profile([300.0, 900.0, 2300.0], 0.9, Low, Some(Plosive)),
            Phoneme::Te => profile([530.0, 1800.0, 2500.0], 1.0, Medium, Some(Plosive)),
            Phoneme::To => profile([570.0, 900.0, 2400.0], 0.95, Medium, Some(Plosive)),

            Phoneme::Na => profile([730.0, 1200.0, 2400.0], 1.0, Medium, Some(Nasal)),
            Phoneme::Ni => profile([270.0, 2200.0, 3000.0], 1.1, Medium, Some(Nasal)),
            Phoneme::Nu => profile([300.0, 900.0, 2200.0], 0.9, Low, Some(Nasal)),
            Phoneme::Ne => profile([530.0, 1800.0, 2500.0], 1.0, Medium, Some(Nasal)),
            Phoneme::No => profile([570.0, 900.0, 2400.0], 0.95, Medium, Some(Nasal)),

            Phoneme::Ha => profile([730.0, 1200.0, 2400.0], 1.0, Medium, Some(Breath)),
            Phoneme::Hi => profile([270.0, 2200.0, 3100.0], 1.1, Medium, Some(Breath)),
            Phoneme::Fu => profile([300.0, 900.0, 2200.0], 0.9, Low, Some(Breath)),
            Phoneme::He => profile([530.0, 1800.0, 2500.0], 1.0, Medium, Some(Breath)),
            Phoneme::Ho => profile([570.0, 900.0, 2400.0], 0.95, Medium, Some(Breath)),

            Phoneme::Ma => profile([730.0, 1200.0, 2400.0], 1.0, Medium, Some(Nasal)),
            Phoneme::Mi => profile([270.0, 2200.0, 3000.0], 1.1, Medium, Some(Nasal)),
            Phoneme::Mu => profile([300.0, 900.0, 2200.0], 0.9, Low, Some(Nasal)),
            Phoneme::Me => profile([530.0, 1800.0, 2500.0], 1.0, Medium, Some(Nasal)),
            Phoneme::Mo => profile([570.0, 900.0, 2400.0], 0.95, Medium, Some(Nasal)),

            Phoneme::Ya => profile([730.0, 1200.0, 2400.0], 1.0, Medium, Some(Glide)),
            Phoneme::Yu => profile([300.0, 900.0, 2200.0], 0.9, Low, Some(Glide)),
            Phoneme::Yo => profile([570.0, 900.0, 2400.0], 0.95, Medium, Some(Glide)),

            Phoneme::Ra => profile([730.0, 1300.0, 2400.0], 1.0, Medium, Some(Liquid)),
            Phoneme::Ri => profile([270.0, 2300.0, 3000.0], 1.1, Medium, Some(Liquid)),
            Phoneme::Ru => profile([300.0, 1000.0, 2200.0], 0.9, Low, Some(Liquid)),
            Phoneme::Re => profile([530.0, 1900.0, 2500.0], 1.0, Medium, Some(Liquid)),
            Phoneme::Ro => profile([570.0, 1000.0, 2400.0], 0.95, Medium, Some(Liquid)),

            Phoneme::Wa => profile([730.0, 1200.0, 2400.0], 1.0, Medium, Some(Glide)),
            Phoneme::Wo => profile([570.0, 900.0, 2400.0], 0.95, Medium, Some(Glide)),

            Phoneme::N => profile([400.0, 1200.0, 2400.0], 0.8, Low, Some(Nasal)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowels_have_no_articulation() {
        for phoneme in [Phoneme::A, Phoneme::I, Phoneme::U, Phoneme::E, Phoneme::O] {
            assert!(phoneme.profile().articulation.is_none());
        }
    }

    #[test]
    fn test_consonant_rows_carry_their_articulation() {
        assert_eq!(Phoneme::Ka.profile().articulation, Some(Articulation::Burst));
        assert_eq!(
            Phoneme::Shi.profile().articulation,
            Some(Articulation::Fricative)
        );
        assert_eq!(Phoneme::Ta.profile().articulation, Some(Articulation::Plosive));
        assert_eq!(Phoneme::Mi.profile().articulation, Some(Articulation::Nasal));
        assert_eq!(Phoneme::Fu.profile().articulation, Some(Articulation::Breath));
        assert_eq!(Phoneme::Ru.profile().articulation, Some(Articulation::Liquid));
        assert_eq!(Phoneme::Wa.profile().articulation, Some(Articulation::Glide));
    }

    #[test]
    fn test_profiles_are_physically_plausible() {
        let phonemes = [
            Phoneme::A,
            Phoneme::Ki,
            Phoneme::Su,
            Phoneme::Te,
            Phoneme::No,
            Phoneme::Ha,
            Phoneme::Mu,
            Phoneme::Yo,
            Phoneme::Re,
            Phoneme::Wo,
            Phoneme::N,
        ];
        for phoneme in phonemes {
            let p = phoneme.profile();
            // Formants ordered and in the speech band.
            assert!(p.formants[0] < p.formants[1]);
            assert!(p.formants[1] < p.formants[2]);
            assert!(p.formants[0] >= 200.0 && p.formants[2] <= 3500.0);
            // Pitch modifier stays near unity.
            assert!((0.5..=1.5).contains(&p.f0_scale));
        }
    }

    #[test]
    fn test_unknown_symbol_gets_default_profile() {
        let fallback = Phoneme::from_symbol("gya").profile();
        assert_eq!(fallback, Phoneme::A.profile());
    }
}
