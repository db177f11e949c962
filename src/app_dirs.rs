use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "ghosttype")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("ghosttype_config.json"))
    }

    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("ghosttype")
                .join("ghosttype.log")
        } else {
            ProjectDirs::from("", "", "ghosttype")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("ghosttype.log"))
                .unwrap_or_else(|| PathBuf::from("ghosttype.log"))
        }
    }
}
