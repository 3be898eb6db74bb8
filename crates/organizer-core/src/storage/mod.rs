mod config;

pub use config::{AgendaConfig, CapacityConfig, Config};

use std::path::PathBuf;

use crate::error::{ConfigError, CoreError};

/// Returns the directory holding `config.toml`.
///
/// `ORGANIZER_DATA_DIR` wins when set. Otherwise `~/.config/organizer`, or
/// `~/.config/organizer-dev` when `ORGANIZER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let dir = match std::env::var_os("ORGANIZER_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("ORGANIZER_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("organizer-dev")
            } else {
                base_dir.join("organizer")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
