//! XPath-style selection and in-place mutation of JSON trees.
//!
//! A path such as `//orgVdcs['cld-1' == unDoubleQuote(value.get('id'))]/name`
//! is split into steps. Each step is resolved against the nodes the previous
//! one produced: `/field` looks at direct fields, `//field` searches the whole
//! subtree. Array values are flattened so that every element is a candidate
//! of its own, and an optional bracketed filter or index narrows the result.
//!
//! Every segment is scanned read-only first. Only once the scan is complete
//! does the engine hand the accepted matches to a [`Visitor`], which receives
//! the parent container mutably and may edit it.
//!
//! ```
//! use jxpath_engine::{JsonXpath, visitors::RemoveFieldVisitor, values};
//! use serde_json::json;
//!
//! let mut tree = json!({"arr": ["x", "y", "z"]});
//! let engine = JsonXpath::new();
//! engine.evaluate(&mut tree, "/arr[value.asText() == 'y']", &mut RemoveFieldVisitor::new()).unwrap();
//! assert_eq!(tree, json!({"arr": ["x", "z"]}));
//!
//! let left = engine.select(&tree, "/arr").unwrap();
//! assert_eq!(values(&left), vec![&json!("x"), &json!("z")]);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod find;
pub mod location;
pub mod path;
pub mod visitor;
pub mod visitors;

// --- Public API ---
pub use config::EngineConfig;
pub use engine::{JsonXpath, Match, evaluate, select, values};
pub use error::XpathError;
pub use find::{exists, find};
pub use location::{Location, Slot};
pub use path::{Path, Relation, Segment, Selector, Step};
pub use visitor::{Visit, VisitFlow, Visitor, from_fn};

pub use jxpath_context::{Context, ContextId, Contexts};
