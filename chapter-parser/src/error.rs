use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChapterError {
    #[error(
        "Cannot determine chapter number: title has no 第…回 marker and file name \"{stem}\" is not a number"
    )]
    InvalidChapterId { stem: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChapterError>;
