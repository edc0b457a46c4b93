use crate::visitor::{Visit, VisitFlow, Visitor};
use jxpath_context::Context;
use jxpath_filter::as_text;
use serde_json::Value;

/// Removes every match from its parent.
///
/// Inside an array, every element whose text equals the match's text goes.
/// Inside an object, the match's field goes if its text still equals the match's.
#[derive(Debug, Clone, Default)]
pub struct RemoveFieldVisitor {
    removed: Vec<String>,
}

impl RemoveFieldVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// What was removed so far: array elements as JSON, fields as `key->value`.
    pub fn removed(&self) -> &[String] {
        &self.removed
    }
}

impl Visitor for RemoveFieldVisitor {
    fn visit(&mut self, _ctx: Context<'_>, visit: Visit<'_>) -> VisitFlow {
        let target = as_text(visit.matched);
        log::debug!("Trying removal of '{}'", target);

        match visit.parent {
            Value::Array(items) => {
                let removed = &mut self.removed;
                items.retain(|item| {
                    let keep = as_text(item) != target;
                    if !keep {
                        removed.push(item.to_string());
                    }
                    keep
                });
            }
            Value::Object(map) => {
                let Some(key) = visit.slot.key() else {
                    return VisitFlow::skip(format!("object parent addressed by {}", visit.slot));
                };
                if map.get(key).is_some_and(|v| as_text(v) == target) {
                    if let Some(value) = map.shift_remove(key) {
                        log::debug!("Removed {}->{}", key, value);
                        self.removed.push(format!("{}->{}", key, value));
                    }
                }
            }
            other => {
                return VisitFlow::skip(format!("cannot remove from scalar parent {}", other));
            }
        }
        VisitFlow::Continue
    }
}
