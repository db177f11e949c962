use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhostError {
    #[error("unknown profile: {0}")]
    ProfileNotFound(String),

    #[error("word list is empty")]
    EmptyWordList,

    #[error("word count must be at least 1, got {0}")]
    InvalidWordCount(usize),

    #[error("invalid profile table: {0}")]
    InvalidProfile(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GhostError>;
