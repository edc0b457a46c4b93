//! Small helpers for reshaping JSON values around path evaluation.
use indexmap::{IndexMap, IndexSet};
use jxpath_filter::as_text;
use serde_json::{Map, Value};

/// Flattens nested objects into dotted keys mapped to the text of each scalar.
///
/// Array elements share their parent's key, so a later element overwrites an
/// earlier one. Empty containers produce no entries.
///
/// `{"A": {"B": {"C": 10}}}` becomes `{"A.B.C": "10"}`.
pub fn flatten_to_map(value: &Value) -> IndexMap<String, String> {
    let mut flat = IndexMap::new();
    flatten_into(String::new(), value, &mut flat);
    flat
}

fn flatten_into(path: String, value: &Value, flat: &mut IndexMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                flatten_into(child_path, child, flat);
            }
        }
        Value::Array(items) => {
            for item in items {
                flatten_into(path.clone(), item, flat);
            }
        }
        scalar => {
            flat.insert(path, as_text(scalar));
        }
    }
}

/// Appends every element of `src` to `dst`.
pub fn append(dst: &mut Vec<Value>, src: &[Value]) {
    dst.extend_from_slice(src);
}

/// Appends a single value to `dst`.
pub fn append_value(dst: &mut Vec<Value>, value: impl Into<Value>) {
    dst.push(value.into());
}

/// Appends the text of each `src` element that `dst` does not already hold.
pub fn append_unique_strings(dst: &mut Vec<Value>, src: &[Value]) {
    let mut present: IndexSet<String> = dst.iter().map(as_text).collect();
    for text in src.iter().map(as_text) {
        if present.insert(text.clone()) {
            dst.push(Value::String(text));
        }
    }
}

/// A new object holding the entries of `src` named in `keys`. Absent keys are left out.
pub fn pick<S: AsRef<str>>(src: &Map<String, Value>, keys: &[S]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| {
            let key = key.as_ref();
            src.get(key).map(|value| (key.to_string(), value.clone()))
        })
        .collect()
}

/// Copies every entry of `src` into `dest`, overwriting existing keys.
pub fn copy_entries(dest: &mut Map<String, Value>, src: &Map<String, Value>) {
    for (key, value) in src {
        dest.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_to_map() {
        let flat = flatten_to_map(&json!({
            "A": {"B": {"C": 10}},
            "tags": ["x", "y"],
            "flag": true,
            "none": null,
            "empty": {}
        }));
        assert_eq!(flat.get("A.B.C").map(String::as_str), Some("10"));
        assert_eq!(flat.get("tags").map(String::as_str), Some("y"));
        assert_eq!(flat.get("flag").map(String::as_str), Some("true"));
        assert_eq!(flat.get("none").map(String::as_str), Some("null"));
        assert!(!flat.contains_key("empty"));
        assert_eq!(flat.keys().collect::<Vec<_>>(), vec!["A.B.C", "tags", "flag", "none"]);
    }

    #[test]
    fn test_append() {
        let mut dst = vec![json!(1)];
        append(&mut dst, &[json!(2), json!({"a": 3})]);
        append_value(&mut dst, "four");
        assert_eq!(dst, vec![json!(1), json!(2), json!({"a": 3}), json!("four")]);
    }

    #[test]
    fn test_append_unique_strings() {
        let mut dst = vec![json!("a")];
        append_unique_strings(&mut dst, &[json!("a"), json!("b"), json!("b"), json!(3)]);
        assert_eq!(dst, vec![json!("a"), json!("b"), json!("3")]);
    }

    #[test]
    fn test_pick_and_copy_entries() {
        let src = json!({"a": 1, "b": 2, "c": 3});
        let src = src.as_object().unwrap();

        let picked = pick(src, &["c", "a", "zzz"]);
        assert_eq!(Value::Object(picked.clone()), json!({"c": 3, "a": 1}));

        let mut dest = json!({"a": 0, "d": 4}).as_object().unwrap().clone();
        copy_entries(&mut dest, src);
        assert_eq!(Value::Object(dest), json!({"a": 1, "d": 4, "b": 2, "c": 3}));
    }
}
