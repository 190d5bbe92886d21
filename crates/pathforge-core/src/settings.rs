//! User customization settings.
//!
//! Pure configuration consumed by the generator (task count/XP bands) and
//! by the toggle path (XP multiplier at award time). Supports dot-path
//! get/set so bindings can expose a generic `settings get/set` surface.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Settings editing unlocks at this level.
pub const SETTINGS_UNLOCK_LEVEL: u32 = 3;
/// Background customization (dim level) unlocks at this level.
pub const BACKGROUND_UNLOCK_LEVEL: u32 = 10;

/// Whether settings editing is unlocked for a level. Enforced by bindings;
/// the engine itself trusts its caller.
pub fn editing_unlocked(level: u32) -> bool {
    level >= SETTINGS_UNLOCK_LEVEL
}

/// Whether background customization is unlocked for a level.
pub fn background_unlocked(level: u32) -> bool {
    level >= BACKGROUND_UNLOCK_LEVEL
}

/// Difficulty preset applied at generation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    /// Fewer tasks, lower XP values
    Easy,
    /// Balanced task load
    Normal,
    /// More tasks, higher XP values
    Hard,
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        DifficultyLevel::Normal
    }
}

impl std::str::FromStr for DifficultyLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyLevel::Easy),
            "normal" => Ok(DifficultyLevel::Normal),
            "hard" => Ok(DifficultyLevel::Hard),
            other => Err(ValidationError::InvalidValue {
                field: "difficulty_level".into(),
                message: format!("unknown difficulty '{other}'"),
            }),
        }
    }
}

/// Customization state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomSettings {
    /// Applied to base XP at award time; clamped to 0.5..=2.0.
    #[serde(default = "default_multiplier")]
    pub xp_multiplier: f64,
    #[serde(default)]
    pub difficulty_level: DifficultyLevel,
    #[serde(default = "default_true")]
    pub auto_generate_tasks: bool,
    #[serde(default = "default_true")]
    pub show_motivational_messages: bool,
    #[serde(default = "default_true")]
    pub enable_notifications: bool,
    /// Background dim overlay, 0.2..=0.8.
    #[serde(default = "default_dim")]
    pub bg_dim_level: f64,
}

fn default_multiplier() -> f64 {
    1.0
}
fn default_true() -> bool {
    true
}
fn default_dim() -> f64 {
    0.5
}

impl Default for CustomSettings {
    fn default() -> Self {
        Self {
            xp_multiplier: 1.0,
            difficulty_level: DifficultyLevel::Normal,
            auto_generate_tasks: true,
            show_motivational_messages: true,
            enable_notifications: true,
            bg_dim_level: 0.5,
        }
    }
}

impl CustomSettings {
    /// Clamp every bounded field into its allowed range.
    pub fn normalized(mut self) -> Self {
        self.xp_multiplier = self.xp_multiplier.clamp(0.5, 2.0);
        self.bg_dim_level = self.bg_dim_level.clamp(0.2, 0.8);
        self
    }

    /// Get a settings value as string by field key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = json.get(key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by field key, parsing the string against the
    /// existing field's type.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ValidationError::InvalidValue {
            field: key.into(),
            message: e.to_string(),
        })?;
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ValidationError::InvalidValue {
                field: key.into(),
                message: "settings did not serialize to an object".into(),
            })?;
        let existing = obj.get(key).ok_or_else(|| ValidationError::InvalidValue {
            field: key.into(),
            message: "unknown settings key".into(),
        })?;

        let parse_err = |msg: String| ValidationError::InvalidValue {
            field: key.into(),
            message: msg,
        };
        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| parse_err(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<f64>()
                    .map_err(|_| parse_err(format!("cannot parse '{value}' as number")))?;
                serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| parse_err(format!("'{value}' is not a finite number")))?
            }
            _ => serde_json::Value::String(value.to_ascii_lowercase()),
        };
        obj.insert(key.to_string(), new_value);

        let parsed: CustomSettings =
            serde_json::from_value(json).map_err(|e| parse_err(e.to_string()))?;
        *self = parsed.normalized();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reset_values() {
        let s = CustomSettings::default();
        assert_eq!(s.xp_multiplier, 1.0);
        assert_eq!(s.difficulty_level, DifficultyLevel::Normal);
        assert!(s.auto_generate_tasks);
        assert!(s.enable_notifications);
        assert_eq!(s.bg_dim_level, 0.5);
    }

    #[test]
    fn normalized_clamps_multiplier_and_dim() {
        let s = CustomSettings {
            xp_multiplier: 9.0,
            bg_dim_level: 0.0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(s.xp_multiplier, 2.0);
        assert_eq!(s.bg_dim_level, 0.2);
    }

    #[test]
    fn get_returns_stringified_values() {
        let s = CustomSettings::default();
        assert_eq!(s.get("xp_multiplier").as_deref(), Some("1.0"));
        assert_eq!(s.get("auto_generate_tasks").as_deref(), Some("true"));
        assert_eq!(s.get("difficulty_level").as_deref(), Some("normal"));
        assert!(s.get("missing").is_none());
    }

    #[test]
    fn set_parses_against_existing_type() {
        let mut s = CustomSettings::default();
        s.set("xp_multiplier", "1.5").unwrap();
        assert_eq!(s.xp_multiplier, 1.5);
        s.set("enable_notifications", "false").unwrap();
        assert!(!s.enable_notifications);
        s.set("difficulty_level", "hard").unwrap();
        assert_eq!(s.difficulty_level, DifficultyLevel::Hard);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_value() {
        let mut s = CustomSettings::default();
        assert!(s.set("nonexistent", "1").is_err());
        assert!(s.set("xp_multiplier", "lots").is_err());
        assert!(s.set("enable_notifications", "maybe").is_err());
    }

    #[test]
    fn set_clamps_out_of_range_values() {
        let mut s = CustomSettings::default();
        s.set("xp_multiplier", "5.0").unwrap();
        assert_eq!(s.xp_multiplier, 2.0);
    }
}
