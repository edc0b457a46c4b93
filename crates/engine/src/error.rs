use jxpath_filter::FilterError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum XpathError {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Filter [{expression}] failed: {source}")]
    FilterEvaluation {
        expression: String,
        #[source]
        source: FilterError,
    },

    #[error("Traversal exceeded the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

impl XpathError {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn filter(expression: impl Into<String>, source: FilterError) -> Self {
        Self::FilterEvaluation {
            expression: expression.into(),
            source,
        }
    }
}
