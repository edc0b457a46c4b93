//! Member access on operands: node accessors and text methods.
use crate::cache::RegexCache;
use crate::error::FilterError;
use crate::value::{Operand, as_text, json_text};
use serde_json::Value;

/// Evaluates `receiver.name(args)`, or the property read `receiver.name`
/// when `args` is `None`.
pub fn call<'a>(
    receiver: Operand<'a>,
    name: &str,
    args: Option<Vec<Operand<'a>>>,
    regexes: &RegexCache,
) -> Result<Operand<'a>, FilterError> {
    match (receiver, args) {
        (Operand::Null, _) => Err(FilterError::type_error(format!(
            "Cannot read property '{}' of null",
            name
        ))),
        // A bare property on a node reads the field of that name.
        (Operand::Node(node), None) => Ok(field(node, name)),
        (Operand::Node(node), Some(args)) => node_method(node, name, args),
        (Operand::Text(s), None) => Ok(text_property(&s, name)),
        (Operand::Text(s), Some(args)) => text_method(s, name, args, regexes),
        (other, Some(args)) if name == "toString" && args.is_empty() => {
            Ok(Operand::Text(other.to_string()))
        }
        (_, None) => Ok(Operand::Null),
        (other, Some(_)) => Err(FilterError::UnknownMethod {
            receiver: other.type_name().to_string(),
            method: name.to_string(),
        }),
    }
}

/// Evaluates `receiver[index]`.
pub fn index<'a>(receiver: Operand<'a>, index: Operand<'a>) -> Result<Operand<'a>, FilterError> {
    match receiver {
        Operand::Null => Err(FilterError::type_error(format!(
            "Cannot read property '{}' of null",
            index
        ))),
        Operand::Node(node) => Ok(child(node, &index)),
        Operand::Text(s) => Ok(match index {
            Operand::Number(i) => position(i)
                .and_then(|i| s.chars().nth(i))
                .map_or(Operand::Null, |c| Operand::Text(c.to_string())),
            _ => Operand::Null,
        }),
        _ => Ok(Operand::Null),
    }
}

fn position(n: f64) -> Option<usize> {
    (n >= 0.0 && n.fract() == 0.0).then_some(n as usize)
}

fn field<'a>(node: &'a Value, name: &str) -> Operand<'a> {
    node.get(name).map_or(Operand::Null, Operand::Node)
}

fn child<'a>(node: &'a Value, key: &Operand) -> Operand<'a> {
    let found = match key {
        Operand::Number(n) => position(*n).and_then(|i| node.get(i)),
        Operand::Text(k) => node.get(k.as_str()),
        _ => None,
    };
    found.map_or(Operand::Null, Operand::Node)
}

fn expect_args<'a, const N: usize>(
    method: &str,
    args: Vec<Operand<'a>>,
) -> Result<[Operand<'a>; N], FilterError> {
    let count = args.len();
    args.try_into().map_err(|_| {
        FilterError::function(method, format!("expects {} argument(s), got {}", N, count))
    })
}

fn node_method<'a>(
    node: &'a Value,
    name: &str,
    args: Vec<Operand<'a>>,
) -> Result<Operand<'a>, FilterError> {
    let result = match name {
        "get" | "path" => {
            let [key] = expect_args::<1>(name, args)?;
            child(node, &key)
        }
        "has" => {
            let [key] = expect_args::<1>(name, args)?;
            Operand::Bool(matches!(child(node, &key), Operand::Node(_)))
        }
        _ => {
            let [] = expect_args::<0>(name, args)?;
            match name {
                "size" => Operand::Number(match node {
                    Value::Array(items) => items.len() as f64,
                    Value::Object(map) => map.len() as f64,
                    _ => 0.0,
                }),
                "asText" => Operand::Text(as_text(node)),
                "toString" => Operand::Text(json_text(node)),
                "isArray" => Operand::Bool(node.is_array()),
                "isObject" => Operand::Bool(node.is_object()),
                "isTextual" => Operand::Bool(node.is_string()),
                "isNumber" => Operand::Bool(node.is_number()),
                "isBoolean" => Operand::Bool(node.is_boolean()),
                "isNull" => Operand::Bool(node.is_null()),
                _ => {
                    return Err(FilterError::UnknownMethod {
                        receiver: "node".to_string(),
                        method: name.to_string(),
                    });
                }
            }
        }
    };
    Ok(result)
}

fn text_property<'a>(s: &str, name: &str) -> Operand<'a> {
    match name {
        "length" => Operand::Number(s.encode_utf16().count() as f64),
        _ => Operand::Null,
    }
}

fn text_method<'a>(
    s: String,
    name: &str,
    args: Vec<Operand<'a>>,
    regexes: &RegexCache,
) -> Result<Operand<'a>, FilterError> {
    let result = match name {
        "matches" => {
            let [pattern] = expect_args::<1>(name, args)?;
            Operand::Bool(regexes.get(&pattern.to_string())?.is_match(&s))
        }
        "startsWith" => {
            let [prefix] = expect_args::<1>(name, args)?;
            Operand::Bool(s.starts_with(&prefix.to_string()))
        }
        "endsWith" => {
            let [suffix] = expect_args::<1>(name, args)?;
            Operand::Bool(s.ends_with(&suffix.to_string()))
        }
        "contains" | "includes" => {
            let [needle] = expect_args::<1>(name, args)?;
            Operand::Bool(s.contains(&needle.to_string()))
        }
        "indexOf" => {
            let [needle] = expect_args::<1>(name, args)?;
            Operand::Number(match s.find(&needle.to_string()) {
                Some(byte) => s[..byte].encode_utf16().count() as f64,
                None => -1.0,
            })
        }
        "equals" => {
            let [other] = expect_args::<1>(name, args)?;
            Operand::Bool(matches!(other, Operand::Text(ref o) if *o == s))
        }
        "equalsIgnoreCase" => {
            let [other] = expect_args::<1>(name, args)?;
            Operand::Bool(matches!(other, Operand::Text(ref o) if o.to_lowercase() == s.to_lowercase()))
        }
        _ => {
            let [] = expect_args::<0>(name, args)?;
            match name {
                "trim" => Operand::Text(s.trim().to_string()),
                "toLowerCase" => Operand::Text(s.to_lowercase()),
                "toUpperCase" => Operand::Text(s.to_uppercase()),
                "isEmpty" => Operand::Bool(s.is_empty()),
                "length" => text_property(&s, "length"),
                "toString" => Operand::Text(s),
                _ => {
                    return Err(FilterError::UnknownMethod {
                        receiver: "string".to_string(),
                        method: name.to_string(),
                    });
                }
            }
        }
    };
    Ok(result)
}
