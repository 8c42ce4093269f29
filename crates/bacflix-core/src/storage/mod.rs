mod config;
pub mod database;
pub mod kv;
pub mod state;

pub use config::{Config, PlanConfig, QuoteConfig, TimerConfig};
pub use database::Database;
pub use kv::{KeyValueStore, MemoryStore};
pub use state::{PersistedState, StateStore, SESSION_KEY, STATE_KEY};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory.
///
/// `BACFLIX_DATA_DIR` wins when set. Otherwise `~/.config/bacflix[-dev]/`,
/// with the `-dev` suffix when `BACFLIX_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("BACFLIX_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("BACFLIX_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("bacflix-dev")
            } else {
                base_dir.join("bacflix")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
