use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Filter parse error in '{0}': {1}")]
    Parse(String, String),

    #[error("Variable '{0}' is not defined")]
    UnknownVariable(String),

    #[error("Function '{0}' is not defined")]
    UnknownFunction(String),

    #[error("Method '{method}' is not defined on {receiver}")]
    UnknownMethod { receiver: String, method: String },

    #[error("Function '{function}' error: {message}")]
    FunctionError { function: String, message: String },

    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Invalid regular expression '{pattern}': {message}")]
    Regex { pattern: String, message: String },
}

impl FilterError {
    pub fn function(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FunctionError {
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::TypeError(message.into())
    }
}
