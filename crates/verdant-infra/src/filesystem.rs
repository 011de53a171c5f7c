//! Data directory layout for Verdant.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "VERDANT_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `VERDANT_DATA_DIR` environment variable
/// 2. `~/.verdant`
/// 3. `./.verdant` when no home directory is known
pub fn resolve_data_dir() -> PathBuf {
    data_dir_from(std::env::var(DATA_DIR_ENV).ok(), dirs::home_dir())
}

fn data_dir_from(env_dir: Option<String>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = env_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    match home {
        Some(home) => home.join(".verdant"),
        None => PathBuf::from(".verdant"),
    }
}

/// Create the data directory if it does not exist yet.
pub async fn ensure_data_dir(dir: &std::path::Path) -> Result<(), std::io::Error> {
    tokio::fs::create_dir_all(dir).await
}
