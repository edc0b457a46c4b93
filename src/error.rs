use jxpath_engine::XpathError;
use thiserror::Error;

/// Errors surfaced by the `jxpath` command-line tool.
#[derive(Error, Debug)]
pub enum JxpathError {
    #[error("Evaluation failed: {0}")]
    Xpath(#[from] XpathError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No node found for '{0}'")]
    NotFound(String),

    #[error("Invalid replacement '{0}', expected FROM=TO")]
    InvalidReplacement(String),
}
