//! Phoneme classification and acoustic profiles.
//!
//! A spectral frame is mapped to one of a closed set of Japanese phoneme
//! symbols by a band-energy heuristic, and each symbol carries an immutable
//! acoustic profile (formant targets, pitch modifier, energy class,
//! articulation) that drives the phoneme-aware synthesizer.

mod classify;
mod profile;

pub use classify::classify_frame;
pub use profile::{Articulation, EnergyClass, PhonemeProfile};

/// Japanese phoneme symbols (gojuon rows plus the moraic nasal).
///
/// The set is closed: every frame classifies to one of these, and textual
/// lookup of anything outside the table resolves to the default open vowel
/// [`Phoneme::A`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phoneme {
    A,
    I,
    U,
    E,
    O,
    Ka,
    Ki,
    Ku,
    Ke,
    Ko,
    Sa,
    Shi,
    Su,
    Se,
    So,
    Ta,
    Chi,
    Tsu,
    Te,
    To,
    Na,
    Ni,
    Nu,
    Ne,
    No,
    Ha,
    Hi,
    Fu,
    He,
    Ho,
    Ma,
    Mi,
    Mu,
    Me,
    Mo,
    Ya,
    Yu,
    Yo,
    Ra,
    Ri,
    Ru,
    Re,
    Ro,
    Wa,
    Wo,
    N,
}

impl Phoneme {
    /// Romaji symbol for this phoneme.
    pub fn symbol(self) -> &'static str {
        match self {
            Phoneme::A => "a",
            Phoneme::I => "i",
            Phoneme::U => "u",
            Phoneme::E => "e",
            Phoneme::O => "o",
            Phoneme::Ka => "ka",
            Phoneme::Ki => "ki",
            Phoneme::Ku => "ku",
            Phoneme::Ke => "ke",
            Phoneme::Ko => "ko",
            Phoneme::Sa => "sa",
            Phoneme::Shi => "shi",
            Phoneme::Su => "su",
            Phoneme::Se => "se",
            Phoneme::So => "so",
            Phoneme::Ta => "ta",
            Phoneme::Chi => "chi",
            Phoneme::Tsu => "tsu",
            Phoneme::Te => "te",
            Phoneme::To => "to",
            Phoneme::Na => "na",
            Phoneme::Ni => "ni",
            Phoneme::Nu => "nu",
            Phoneme::Ne => "ne",
            Phoneme::No => "no",
            Phoneme::Ha => "ha",
            Phoneme::Hi => "hi",
            Phoneme::Fu => "fu",
            Phoneme::He => "he",
            Phoneme::Ho => "ho",
            Phoneme::Ma => "ma",
            Phoneme::Mi => "mi",
            Phoneme::Mu => "mu",
            Phoneme::Me => "me",
            Phoneme::Mo => "mo",
            Phoneme::Ya => "ya",
            Phoneme::Yu => "yu",
            Phoneme::Yo => "yo",
            Phoneme::Ra => "ra",
            Phoneme::Ri => "ri",
            Phoneme::Ru => "ru",
            Phoneme::Re => "re",
            Phoneme::Ro => "ro",
            Phoneme::Wa => "wa",
            Phoneme::Wo => "wo",
            Phoneme::N => "n",
        }
    }

    /// Parses a romaji symbol.
    ///
    /// Unknown symbols resolve to [`Phoneme::A`] rather than failing, so a
    /// caller feeding symbols from a larger alphabet still gets a usable
    /// profile.
    pub fn from_symbol(symbol: &str) -> Phoneme {
        match symbol {
            "a" => Phoneme::A,
            "i" => Phoneme::I,
            "u" => Phoneme::U,
            "e" => Phoneme::E,
            "o" => Phoneme::O,
            "ka" => Phoneme::Ka,
            "ki" => Phoneme::Ki,
            "ku" => Phoneme::Ku,
            "ke" => Phoneme::Ke,
            "ko" => Phoneme::Ko,
            "sa" => Phoneme::Sa,
            "shi" => Phoneme::Shi,
            "su" => Phoneme::Su,
            "se" => Phoneme::Se,
            "so" => Phoneme::So,
            "ta" => Phoneme::Ta,
            "chi" => Phoneme::Chi,
            "tsu" => Phoneme::Tsu,
            "te" => Phoneme::Te,
            "to" => Phoneme::To,
            "na" => Phoneme::Na,
            "ni" => Phoneme::Ni,
            "nu" => Phoneme::Nu,
            "ne" => Phoneme::Ne,
            "no" => Phoneme::No,
            "ha" => Phoneme::Ha,
            "hi" => Phoneme::Hi,
            "fu" => Phoneme::Fu,
            "he" => Phoneme::He,
            "ho" => Phoneme::Ho,
            "ma" => Phoneme::Ma,
            "mi" => Phoneme::Mi,
            "mu" => Phoneme::Mu,
            "me" => Phoneme::Me,
            "mo" => Phoneme::Mo,
            "ya" => Phoneme::Ya,
            "yu" => Phoneme::Yu,
            "yo" => Phoneme::Yo,
            "ra" => Phoneme::Ra,
            "ri" => Phoneme::Ri,
            "ru" => Phoneme::Ru,
            "re" => Phoneme::Re,
            "ro" => Phoneme::Ro,
            "wa" => Phoneme::Wa,
            "wo" => Phoneme::Wo,
            "n" => Phoneme::N,
            _ => Phoneme::A,
        }
    }
}
