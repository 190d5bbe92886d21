//! Identity paths, user profile, and per-path setup configuration.
//!
//! The identity path is chosen once during onboarding and fixes the
//! vocabulary and generation rules for daily protocols. There is no
//! transition rule for changing it afterwards.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The user's chosen habit category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IdentityPath {
    /// Study and knowledge work
    Scholar,
    /// Fitness and physical training
    Warrior,
    /// Deep work and time ownership
    Focus,
    /// Routine and self-control
    Discipline,
}

impl IdentityPath {
    /// All selectable paths, in onboarding display order.
    pub const ALL: [IdentityPath; 4] = [
        IdentityPath::Scholar,
        IdentityPath::Warrior,
        IdentityPath::Focus,
        IdentityPath::Discipline,
    ];

    /// Stable lowercase identifier, also the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityPath::Scholar => "scholar",
            IdentityPath::Warrior => "warrior",
            IdentityPath::Focus => "focus",
            IdentityPath::Discipline => "discipline",
        }
    }

    /// Display title shown on the dashboard.
    pub fn title(&self) -> &'static str {
        match self {
            IdentityPath::Scholar => "Scholar Mode",
            IdentityPath::Warrior => "Warrior Mode",
            IdentityPath::Focus => "Focus Mode",
            IdentityPath::Discipline => "Discipline Mode",
        }
    }

    /// One-line motto for the path.
    pub fn motto(&self) -> &'static str {
        match self {
            IdentityPath::Scholar => "Master your knowledge",
            IdentityPath::Warrior => "Build your strength",
            IdentityPath::Focus => "Own your time",
            IdentityPath::Discipline => "Control your destiny",
        }
    }
}

impl std::str::FromStr for IdentityPath {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scholar" => Ok(IdentityPath::Scholar),
            "warrior" => Ok(IdentityPath::Warrior),
            "focus" => Ok(IdentityPath::Focus),
            "discipline" => Ok(IdentityPath::Discipline),
            other => Err(ValidationError::InvalidValue {
                field: "identity".into(),
                message: format!("unknown identity path '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for IdentityPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported gender, used only for cosmetic theming defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

/// Onboarding profile. Immutable except full replacement; removed only by
/// a full data wipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
}

impl Profile {
    /// Validate and construct a profile.
    ///
    /// # Errors
    /// Rejects an empty name or an age outside 10..=99.
    pub fn new(name: impl Into<String>, age: u8, gender: Gender) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "name".into(),
            });
        }
        if !(10..=99).contains(&age) {
            return Err(ValidationError::InvalidValue {
                field: "age".into(),
                message: format!("{age} is outside 10..=99"),
            });
        }
        Ok(Profile {
            name: name.trim().to_string(),
            age,
            gender,
        })
    }
}

/// Fitness level for the warrior setup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Where the warrior trains.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrainingLocation {
    Home,
    Gym,
}

/// What kind of focus work the user does.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FocusType {
    Student,
    Entrepreneur,
    Creator,
}

/// Identity-specific configuration captured during setup.
///
/// Presence of a config signals setup completion; the generator refuses to
/// run before one exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "path", rename_all = "lowercase")]
pub enum ModeConfig {
    Scholar {
        subjects: Vec<String>,
        hours_daily: u8,
        exam_date: Option<chrono::NaiveDate>,
    },
    Warrior {
        fitness_level: FitnessLevel,
        location: TrainingLocation,
        days_per_week: u8,
    },
    Focus {
        focus_type: FocusType,
        hours_available: u8,
    },
    Discipline {
        /// Wake time as "HH:MM"
        wake_time: String,
    },
}

impl ModeConfig {
    /// The identity path this configuration belongs to.
    pub fn path(&self) -> IdentityPath {
        match self {
            ModeConfig::Scholar { .. } => IdentityPath::Scholar,
            ModeConfig::Warrior { .. } => IdentityPath::Warrior,
            ModeConfig::Focus { .. } => IdentityPath::Focus,
            ModeConfig::Discipline { .. } => IdentityPath::Discipline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_rejects_empty_name() {
        assert!(Profile::new("   ", 20, Gender::Other).is_err());
    }

    #[test]
    fn profile_rejects_age_out_of_range() {
        assert!(Profile::new("Rei", 9, Gender::Female).is_err());
        assert!(Profile::new("Rei", 100, Gender::Female).is_err());
        assert!(Profile::new("Rei", 10, Gender::Female).is_ok());
    }

    #[test]
    fn profile_trims_name() {
        let p = Profile::new("  Rei ", 20, Gender::Female).unwrap();
        assert_eq!(p.name, "Rei");
    }

    #[test]
    fn identity_parses_case_insensitively() {
        assert_eq!(
            "Scholar".parse::<IdentityPath>().unwrap(),
            IdentityPath::Scholar
        );
        assert!("wizard".parse::<IdentityPath>().is_err());
    }

    #[test]
    fn mode_config_reports_its_path() {
        let cfg = ModeConfig::Discipline {
            wake_time: "06:00".into(),
        };
        assert_eq!(cfg.path(), IdentityPath::Discipline);
    }
}
