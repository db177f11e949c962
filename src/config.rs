use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::profile::DEFAULT_PROFILE_ID;
use crate::sentence::DEFAULT_WORD_COUNT;

pub const DEFAULT_TICK_RATE_MS: u64 = 16;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub profile: String,
    pub word_count: usize,
    pub words_path: Option<PathBuf>,
    pub profiles_path: Option<PathBuf>,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE_ID.to_string(),
            word_count: DEFAULT_WORD_COUNT,
            words_path: None,
            profiles_path: None,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing file means defaults; an unreadable one is logged and ignored
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_default() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cfg = Config {
            profile: "LSQWWDXEYO".into(),
            word_count: 25,
            words_path: Some(PathBuf::from("/tmp/words.txt")),
            profiles_path: None,
            tick_rate_ms: 8,
        };
        fs::write(&path, serde_json::to_vec_pretty(&cfg).unwrap()).unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), cfg);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "word_count": 3 }"#).unwrap();
        let cfg = FileConfigStore::with_path(&path).load();
        assert_eq!(cfg.word_count, 3);
        assert_eq!(cfg.profile, DEFAULT_PROFILE_ID);
        assert_eq!(cfg.tick_rate_ms, DEFAULT_TICK_RATE_MS);
    }

    #[test]
    fn garbage_config_gives_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }
}
