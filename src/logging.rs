use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

/// Route tracing output to a file so it never draws over the terminal UI.
/// `RUST_LOG` overrides the default `info` filter. Returns the log path.
pub fn init(path: Option<&Path>) -> io::Result<PathBuf> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(AppDirs::log_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a subscriber installed earlier in the process keeps receiving events
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
    {
        eprintln!("log file {} not attached: {err}", path.display());
    }

    Ok(path)
}
