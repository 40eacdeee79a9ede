//! Optimization modes and local token estimation

mod estimate;

pub use estimate::{estimate_tokens, SavingsEstimate};

use serde::{Deserialize, Serialize};

/// Aggressiveness tier sent to the backend
///
/// Callers may use either vocabulary: `safe`/`balanced`/`aggressive` or the
/// legacy `low`/`medium`/`high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Safe,
    #[default]
    Balanced,
    Aggressive,
}

/// Accepted mode names and what they normalize to
const MODE_ALIASES: &[(&str, Mode)] = &[
    ("safe", Mode::Safe),
    ("low", Mode::Safe),
    ("balanced", Mode::Balanced),
    ("medium", Mode::Balanced),
    ("aggressive", Mode::Aggressive),
    ("high", Mode::Aggressive),
];

impl Mode {
    /// Map any accepted spelling to its tier. Unrecognized values fall back
    /// to `Balanced`.
    pub fn normalize(mode: &str) -> Mode {
        let mode = mode.trim().to_lowercase();
        MODE_ALIASES
            .iter()
            .find(|(name, _)| *name == mode)
            .map(|(_, tier)| *tier)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Safe => "safe",
            Mode::Balanced => "balanced",
            Mode::Aggressive => "aggressive",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a mode string to its wire name
pub fn normalize_mode(mode: &str) -> &'static str {
    Mode::normalize(mode).as_str()
}
