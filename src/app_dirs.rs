use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join("penjat"),
            )
        } else {
            ProjectDirs::from("", "", "penjat")
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
        }
    }

    /// Directory holding the durable key/value snapshots.
    pub fn store_dir() -> Option<PathBuf> {
        Self::state_dir().map(|d| d.join("store"))
    }

    /// File holding the cookie jar.
    pub fn cookie_path() -> Option<PathBuf> {
        Self::state_dir().map(|d| d.join("cookies.json"))
    }

    /// Append-only log of finished games.
    pub fn log_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "penjat").map(|proj_dirs| proj_dirs.config_dir().join("log.csv"))
    }
}
