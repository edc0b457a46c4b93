//! Direct lookup of a single node, without filters or visitors.
use crate::error::XpathError;
use serde_json::Value;

/// Follows `path` one `/`-separated piece at a time, taking the first node
/// found for each piece anywhere below the current one.
///
/// `field[n]` then selects the n-th element of the found array. Other bracket
/// contents are ignored. Empty pieces are skipped, so `a//b` reads as `a/b`.
pub fn find<'a>(tree: &'a Value, path: &str) -> Result<Option<&'a Value>, XpathError> {
    if path.is_empty() {
        return Err(XpathError::invalid_path(path, "empty path"));
    }

    let mut current = tree;
    for piece in path.split('/').filter(|piece| !piece.is_empty()) {
        let (field, bracket) = split_bracket(path, piece)?;

        let Some(found) = find_path(current, field) else {
            return Ok(None);
        };
        current = found;

        if let Some(index) = bracket.filter(|b| b.starts_with(|c: char| c.is_ascii_digit())) {
            let element = index
                .parse::<usize>()
                .ok()
                .and_then(|i| current.as_array()?.get(i));
            match element {
                Some(element) => current = element,
                None => return Ok(None),
            }
        }
    }
    Ok(Some(current))
}

/// Whether [`find`] locates a node.
pub fn exists(tree: &Value, path: &str) -> Result<bool, XpathError> {
    Ok(find(tree, path)?.is_some())
}

fn split_bracket<'p>(path: &str, piece: &'p str) -> Result<(&'p str, Option<&'p str>), XpathError> {
    let Some(open) = piece.find('[') else {
        return Ok((piece, None));
    };
    let close = piece[open..]
        .find(']')
        .map(|offset| open + offset)
        .ok_or_else(|| XpathError::invalid_path(path, format!("unclosed '[' in '{}'", piece)))?;
    Ok((&piece[..open], Some(&piece[open + 1..close])))
}

/// The first value under a `field` key, depth first. Each key is checked
/// before the value beneath it is searched.
fn find_path<'a>(node: &'a Value, field: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.iter().find_map(|(key, value)| {
            if key == field {
                Some(value)
            } else {
                find_path(value, field)
            }
        }),
        Value::Array(items) => items.iter().find_map(|item| find_path(item, field)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> Value {
        json!({
            "outer": {"deep": {"target": 1}},
            "target": 2,
            "list": {"items": ["a", "b", "c"]}
        })
    }

    #[test]
    fn test_first_match_is_depth_first() {
        let tree = tree();
        // The nested "target" is reached before the top-level one.
        assert_eq!(find(&tree, "target").unwrap(), Some(&json!(1)));
        assert_eq!(find(&tree, "outer/target").unwrap(), Some(&json!(1)));
        assert_eq!(find(&tree, "missing").unwrap(), None);
    }

    #[test]
    fn test_index() {
        let tree = tree();
        assert_eq!(find(&tree, "list/items[1]").unwrap(), Some(&json!("b")));
        assert_eq!(find(&tree, "items[5]").unwrap(), None);
        assert_eq!(find(&tree, "target[0]").unwrap(), None);
        // Filters are not evaluated here.
        assert_eq!(
            find(&tree, "items[value == 'x']").unwrap(),
            Some(&json!(["a", "b", "c"]))
        );
    }

    #[test]
    fn test_empty_pieces_and_errors() {
        let tree = tree();
        assert_eq!(find(&tree, "/list//items[0]").unwrap(), Some(&json!("a")));
        assert_eq!(find(&tree, "/").unwrap(), Some(&tree));
        assert!(matches!(find(&tree, "").unwrap_err(), XpathError::InvalidPath { .. }));
        assert!(find(&tree, "items[0").is_err());
    }

    #[test]
    fn test_exists() {
        let tree = tree();
        assert!(exists(&tree, "deep/target").unwrap());
        assert!(!exists(&tree, "deep/nothing").unwrap());
    }
}
