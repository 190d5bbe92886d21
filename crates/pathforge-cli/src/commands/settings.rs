//! Settings management commands.

use clap::Subcommand;
use pathforge_core::settings::{background_unlocked, editing_unlocked};
use pathforge_core::Theme;

use crate::common;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. xp_multiplier)
        key: String,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Reset all settings to defaults
    Reset,
    /// Select a theme
    Theme {
        /// default, neon-ascent, midnight-vault, or identity-frequency
        name: String,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let (db, mut engine) = common::open()?;
    let level = engine.progression().level;

    match action {
        SettingsAction::Get { key } => match engine.settings().get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown settings key '{key}'").into()),
        },
        SettingsAction::Set { key, value } => {
            if !editing_unlocked(level) {
                return Err(format!("settings editing unlocks at level 3 (you are level {level})").into());
            }
            if key == "bg_dim_level" && !background_unlocked(level) {
                return Err(format!(
                    "background customization unlocks at level 10 (you are level {level})"
                )
                .into());
            }
            engine.set_setting(&key, &value)?;
            common::save(&db, &engine)?;
            println!(
                "{key} = {}",
                engine.settings().get(&key).unwrap_or_default()
            );
        }
        SettingsAction::List => {
            println!("{}", serde_json::to_string_pretty(engine.settings())?);
        }
        SettingsAction::Reset => {
            engine.reset_settings();
            common::save(&db, &engine)?;
            println!("Settings reset to defaults");
        }
        SettingsAction::Theme { name } => {
            let theme: Theme = name.parse()?;
            engine.set_theme(theme, common::today())?;
            common::save(&db, &engine)?;
            println!("Theme set: {}", theme.as_str());
        }
    }
    Ok(())
}
