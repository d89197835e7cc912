use std::str::FromStr;

use thiserror::Error;

/// JLPT proficiency level, declared easiest to hardest so the derived `Ord` follows difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum_macros::Display)]
pub enum Tier {
    N5,
    N4,
    N3,
    N2,
    N1,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown JLPT tier `{0}`")]
pub struct UnknownTier(pub String);

impl Tier {
    /// Easiest to hardest
    pub const ALL: [Tier; 5] = [Tier::N5, Tier::N4, Tier::N3, Tier::N2, Tier::N1];

    /// Resolution order for a word listed under more than one tier: the first match wins.
    pub const PRIORITY: [Tier; 5] = [Tier::N1, Tier::N2, Tier::N3, Tier::N4, Tier::N5];

    /// Difficulty score, N5 = 1 through N1 = 5
    pub fn score(self) -> u8 {
        match self {
            Tier::N5 => 1,
            Tier::N4 => 2,
            Tier::N3 => 3,
            Tier::N2 => 4,
            Tier::N1 => 5,
        }
    }
}

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N5" => Ok(Tier::N5),
            "N4" => Ok(Tier::N4),
            "N3" => Ok(Tier::N3),
            "N2" => Ok(Tier::N2),
            "N1" => Ok(Tier::N1),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}

/// Score for a tier label, or `None` when the label names no declared tier
pub fn score_label(label: &str) -> Option<u8> {
    label.parse::<Tier>().ok().map(Tier::score)
}
