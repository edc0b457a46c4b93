use crate::visitor::{Visit, VisitFlow, Visitor};
use jxpath_context::Context;
use jxpath_filter::as_text;
use serde_json::Value;
use std::collections::HashMap;

/// Replaces matches whose text has an entry in the replacement map.
///
/// Inside an array, every element with the match's text is removed and one
/// replacement is appended. Inside an object, the field is overwritten in place.
/// Matches without a replacement are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ReplaceTextVisitor {
    replacements: HashMap<String, String>,
    replaced: usize,
}

impl ReplaceTextVisitor {
    pub fn new(replacements: HashMap<String, String>) -> Self {
        Self {
            replacements,
            replaced: 0,
        }
    }

    /// Builds the map from the string-valued entries of a JSON object.
    pub fn from_json(replacements: &Value) -> Self {
        let map = replacements
            .as_object()
            .into_iter()
            .flatten()
            .filter_map(|(k, v)| match v {
                Value::String(s) => Some((k.clone(), s.clone())),
                _ => {
                    log::debug!("Ignoring non-text replacement for '{}': {}", k, v);
                    None
                }
            })
            .collect();
        Self::new(map)
    }

    /// How many matches were replaced so far.
    pub fn replaced(&self) -> usize {
        self.replaced
    }
}

impl Visitor for ReplaceTextVisitor {
    fn visit(&mut self, _ctx: Context<'_>, visit: Visit<'_>) -> VisitFlow {
        let original = as_text(visit.matched);
        let Some(replacement) = self.replacements.get(&original) else {
            log::debug!("No replacement value found for {}", visit.matched);
            return VisitFlow::Continue;
        };
        log::debug!("Replacing '{}' with '{}'", original, replacement);

        match visit.parent {
            Value::Array(items) => {
                items.retain(|item| as_text(item) != original);
                items.push(Value::String(replacement.clone()));
            }
            Value::Object(map) => {
                let Some(key) = visit.slot.key() else {
                    return VisitFlow::skip(format!("object parent addressed by {}", visit.slot));
                };
                match map.get_mut(key) {
                    Some(field) if as_text(field) == original => {
                        *field = Value::String(replacement.clone());
                    }
                    _ => return VisitFlow::Continue,
                }
            }
            other => {
                return VisitFlow::skip(format!("cannot replace inside scalar parent {}", other));
            }
        }
        self.replaced += 1;
        VisitFlow::Continue
    }
}
