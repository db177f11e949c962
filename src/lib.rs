// Library surface for the binary and the headless/integration tests.
use include_dir::{include_dir, Dir};

pub mod app;
pub mod app_dirs;
pub mod chart;
pub mod config;
pub mod controller;
pub mod direction;
pub mod error;
pub mod ghost;
pub mod logging;
pub mod profile;
pub mod runtime;
pub mod sentence;
pub mod session;
pub mod summary;
pub mod tracker;
pub mod ui;
pub mod util;
pub mod words;

pub use error::{GhostError, Result};

pub(crate) static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/data");
