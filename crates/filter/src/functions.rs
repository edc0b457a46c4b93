//! Defines the registry and built-in implementations for filter functions.
use crate::error::FilterError;
use crate::value::{Operand, json_text};
use std::collections::HashMap;

/// The signature for a custom filter function implementation.
pub type FilterFunction = for<'a> fn(args: Vec<Operand<'a>>) -> Result<Operand<'a>, FilterError>;

/// A registry to hold all available functions for the evaluator.
#[derive(Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, FilterFunction>,
}

impl FunctionRegistry {
    /// Creates a new, empty function registry.
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Registers a new function, replacing any previous one with the same name.
    pub fn register(&mut self, name: &str, func: FilterFunction) {
        self.functions.insert(name.to_string(), func);
    }

    /// Finds a function by name. Names are case-sensitive.
    pub fn get(&self, name: &str) -> Option<FilterFunction> {
        self.functions.get(name).copied()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("FunctionRegistry")
            .field("functions", &names)
            .finish()
    }
}

fn single_arg<'a>(function: &str, args: Vec<Operand<'a>>) -> Result<Operand<'a>, FilterError> {
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(arg), None) => Ok(arg),
        _ => Err(FilterError::function(function, "expects exactly one argument")),
    }
}

// --- Built-in Function Implementations ---

/// Text of the argument with one wrapping pair of double quotes removed.
/// Nodes are rendered as JSON first, so string nodes lose their quotes here.
fn un_double_quote<'a>(args: Vec<Operand<'a>>) -> Result<Operand<'a>, FilterError> {
    let text = match single_arg("unDoubleQuote", args)? {
        Operand::Node(node) => json_text(node),
        other => other.to_string(),
    };
    let stripped = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(str::to_string)
        .unwrap_or(text);
    Ok(Operand::Text(stripped))
}

fn string<'a>(args: Vec<Operand<'a>>) -> Result<Operand<'a>, FilterError> {
    Ok(Operand::Text(single_arg("String", args)?.to_string()))
}

fn number<'a>(args: Vec<Operand<'a>>) -> Result<Operand<'a>, FilterError> {
    Ok(Operand::Number(single_arg("Number", args)?.to_number()))
}

impl Default for FunctionRegistry {
    /// Creates a new registry populated with all built-in functions.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register("unDoubleQuote", un_double_quote);
        registry.register("String", string);
        registry.register("Number", number);
        registry
    }
}
