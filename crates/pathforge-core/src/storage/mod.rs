pub mod database;

pub use database::{Database, StateStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/pathforge[-dev]/` based on PATHFORGE_ENV.
///
/// Set PATHFORGE_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PATHFORGE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pathforge-dev")
    } else {
        base_dir.join("pathforge")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::QueryFailed(format!("cannot create {}: {e}", dir.display())))?;
    Ok(dir)
}
