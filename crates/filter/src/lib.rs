//! A small expression language for filtering JSON nodes.
//!
//! A filter is evaluated once per candidate node, which is bound to the
//! variable `value`. The syntax is a JavaScript-flavoured subset: literals,
//! `== === != !==`, relational and arithmetic operators, `&& || !`, calls to
//! registered functions and methods on nodes and strings.
//!
//! ```
//! use jxpath_filter::{Environment, Filter};
//! use serde_json::json;
//!
//! let filter = Filter::compile("unDoubleQuote(value.get('id')).startsWith('cld-')").unwrap();
//! let env = Environment::default();
//! assert!(filter.matches(&json!({"id": "cld-1"}), &env).unwrap());
//! ```

pub mod ast;
pub mod bindings;
mod cache;
pub mod engine;
pub mod error;
pub mod functions;
mod methods;
mod operators;
mod parser;
pub mod value;

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// --- Public API ---
pub use ast::Expression;
pub use bindings::{Bindings, VALUE_VARIABLE, default_bindings};
pub use cache::RegexCache;
pub use engine::{Environment, EvaluationContext, evaluate, evaluate_predicate};
pub use error::FilterError;
pub use functions::{FilterFunction, FunctionRegistry};
pub use parser::parse_expression;
pub use value::{Operand, as_text, json_text};

/// A parsed filter, ready to be evaluated against any number of candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    source: String,
    expression: Expression,
}

impl Filter {
    pub fn compile(source: &str) -> Result<Self, FilterError> {
        Ok(Self {
            source: source.to_string(),
            expression: parse_expression(source)?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Evaluates the filter with `value` bound to the candidate.
    pub fn evaluate<'a>(&self, value: &'a Value, environment: &'a Environment) -> Result<Operand<'a>, FilterError> {
        evaluate(&self.expression, &EvaluationContext { value, environment })
    }

    /// True only when the filter evaluates to the boolean `true`.
    pub fn matches(&self, value: &Value, environment: &Environment) -> Result<bool, FilterError> {
        let accepted = evaluate_predicate(&self.expression, &EvaluationContext { value, environment })?;
        log::trace!("Filter [{}] on {} -> {}", self.source, value, accepted);
        Ok(accepted)
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
