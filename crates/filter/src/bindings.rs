//! Names pre-bound in every filter environment.
use serde_json::Value;
use std::collections::HashMap;

/// Name under which the candidate node is bound.
pub const VALUE_VARIABLE: &str = "value";

/// Constants visible to filter expressions, by name.
pub type Bindings = HashMap<String, Value>;

/// Regex character-class shorthands, so `'cld-(' + d + '+)'` reads as `cld-(\d+)`.
const CHARACTER_CLASSES: [(&str, &str); 8] = [
    ("d", r"\d"),
    ("D", r"\D"),
    ("s", r"\s"),
    ("S", r"\S"),
    ("b", r"\b"),
    ("B", r"\B"),
    ("w", r"\w"),
    ("W", r"\W"),
];

pub fn default_bindings() -> Bindings {
    CHARACTER_CLASSES
        .iter()
        .map(|(name, class)| (name.to_string(), Value::String(class.to_string())))
        .collect()
}
