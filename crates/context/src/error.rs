use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("Cannot overwrite value for the reserved key '{0}'")]
    ReservedKey(String),
}
