//! Runtime operands and the coercions applied between them.
use crate::ast::Literal;
use serde_json::Value;
use std::fmt;

/// A value produced while evaluating a filter.
///
/// Primitives are owned; `Node` borrows from the candidate tree, so `get`
/// chains never copy subtrees.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'a> {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Node(&'a Value),
}

impl<'a> Operand<'a> {
    /// Lifts a bound constant. Scalars become primitives, containers stay nodes.
    pub fn from_binding(value: &'a Value) -> Self {
        match value {
            Value::Null => Operand::Null,
            Value::Bool(b) => Operand::Bool(*b),
            Value::Number(n) => Operand::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Operand::Text(s.clone()),
            _ => Operand::Node(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::Null => "null",
            Operand::Bool(_) => "boolean",
            Operand::Number(_) => "number",
            Operand::Text(_) => "string",
            Operand::Node(_) => "node",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Operand::Null => false,
            Operand::Bool(b) => *b,
            Operand::Number(n) => *n != 0.0 && !n.is_nan(),
            Operand::Text(s) => !s.is_empty(),
            Operand::Node(_) => true,
        }
    }

    /// Converts a node to its JSON text; primitives are returned unchanged.
    pub fn to_primitive(&self) -> Operand<'a> {
        match self {
            Operand::Node(node) => Operand::Text(json_text(node)),
            other => other.clone(),
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Operand::Null => 0.0,
            Operand::Bool(b) => f64::from(u8::from(*b)),
            Operand::Number(n) => *n,
            Operand::Text(s) => text_to_number(s),
            Operand::Node(node) => text_to_number(&json_text(node)),
        }
    }
}

impl From<&Literal> for Operand<'_> {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Null => Operand::Null,
            Literal::Bool(b) => Operand::Bool(*b),
            Literal::Number(n) => Operand::Number(*n),
            Literal::Text(s) => Operand::Text(s.clone()),
        }
    }
}

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Null => f.write_str("null"),
            Operand::Bool(b) => write!(f, "{}", b),
            Operand::Number(n) => f.write_str(&format_number(*n)),
            Operand::Text(s) => f.write_str(s),
            Operand::Node(node) => f.write_str(&json_text(node)),
        }
    }
}

/// The node's text value: strings unquoted, numbers and booleans as written,
/// `"null"` for null and the empty string for containers.
pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// The node serialized as compact JSON. Strings keep their quotes.
pub fn json_text(value: &Value) -> String {
    value.to_string()
}

/// Formats a number the way script engines print them: integral values
/// carry no fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

fn text_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    match trimmed {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_to_number(&trimmed[2..], radix);
    }
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Unsigned digits in `radix`, accumulated as a float so long literals don't overflow.
fn radix_to_number(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_text_matches_node_text_semantics() {
        assert_eq!(as_text(&json!("Active")), "Active");
        assert_eq!(as_text(&json!(12)), "12");
        assert_eq!(as_text(&json!(1.5)), "1.5");
        assert_eq!(as_text(&json!(true)), "true");
        assert_eq!(as_text(&json!(null)), "null");
        assert_eq!(as_text(&json!({"a": 1})), "");
        assert_eq!(as_text(&json!([1, 2])), "");
    }

    #[test]
    fn test_node_to_primitive_keeps_quotes() {
        let node = json!("Active");
        assert_eq!(Operand::Node(&node).to_primitive(), Operand::Text("\"Active\"".to_string()));
        let flag = json!(true);
        assert_eq!(Operand::Node(&flag).to_primitive(), Operand::Text("true".to_string()));
    }

    #[test]
    fn test_truthiness() {
        assert!(!Operand::Null.is_truthy());
        assert!(!Operand::Number(0.0).is_truthy());
        assert!(!Operand::Number(f64::NAN).is_truthy());
        assert!(!Operand::Text(String::new()).is_truthy());
        assert!(Operand::Text("0".to_string()).is_truthy());
        let empty = json!([]);
        assert!(Operand::Node(&empty).is_truthy());
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(Operand::Text(" 42 ".to_string()).to_number(), 42.0);
        assert_eq!(Operand::Text(String::new()).to_number(), 0.0);
        assert!(Operand::Text("inf".to_string()).to_number().is_nan());
        assert_eq!(Operand::Text("Infinity".to_string()).to_number(), f64::INFINITY);
        assert_eq!(Operand::Text(" -Infinity".to_string()).to_number(), f64::NEG_INFINITY);
        assert_eq!(Operand::Text("0x10".to_string()).to_number(), 16.0);
        assert_eq!(Operand::Text("0b101".to_string()).to_number(), 5.0);
        assert_eq!(Operand::Text("0o17".to_string()).to_number(), 15.0);
        assert!(Operand::Text("0x".to_string()).to_number().is_nan());
        assert!(Operand::Text("0xg1".to_string()).to_number().is_nan());
        assert!(Operand::Text("0x+1".to_string()).to_number().is_nan());
        assert_eq!(Operand::Bool(true).to_number(), 1.0);
        let n = json!(7);
        assert_eq!(Operand::Node(&n).to_number(), 7.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(-1e20), "-100000000000000000000");
        assert_eq!(format_number(9007199254740993.0), "9007199254740992");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_from_binding() {
        let class = json!("\\d");
        assert_eq!(Operand::from_binding(&class), Operand::Text("\\d".to_string()));
        let obj = json!({"k": 1});
        assert_eq!(Operand::from_binding(&obj), Operand::Node(&obj));
    }
}
