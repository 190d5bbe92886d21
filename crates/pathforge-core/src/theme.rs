//! Cosmetic themes as a closed tagged variant.
//!
//! Each variant carries an explicit unlock predicate instead of the open
//! string-keyed flag map a plugin system would use.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// Always available.
    Default,
    /// Unlocks at phase 4 (Mastery).
    NeonAscent,
    /// Premium only.
    MidnightVault,
    /// Premium only.
    IdentityFrequency,
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::Default,
        Theme::NeonAscent,
        Theme::MidnightVault,
        Theme::IdentityFrequency,
    ];

    /// Whether the theme is selectable for the given progression state.
    pub fn unlocked(&self, phase: u8, is_premium: bool) -> bool {
        match self {
            Theme::Default => true,
            Theme::NeonAscent => phase >= 4,
            Theme::MidnightVault | Theme::IdentityFrequency => is_premium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::NeonAscent => "neon-ascent",
            Theme::MidnightVault => "midnight-vault",
            Theme::IdentityFrequency => "identity-frequency",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Default
    }
}

impl std::str::FromStr for Theme {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s.to_ascii_lowercase())
            .ok_or_else(|| crate::error::ValidationError::InvalidValue {
                field: "theme".into(),
                message: format!("unknown theme '{s}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_always_unlocked() {
        assert!(Theme::Default.unlocked(1, false));
    }

    #[test]
    fn phase_gate_and_premium_gate() {
        assert!(!Theme::NeonAscent.unlocked(3, true));
        assert!(Theme::NeonAscent.unlocked(4, false));
        assert!(!Theme::MidnightVault.unlocked(5, false));
        assert!(Theme::MidnightVault.unlocked(1, true));
    }

    #[test]
    fn roundtrips_through_str() {
        for theme in Theme::ALL {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
        }
    }
}
