//! Select, filter and edit JSON documents with XPath-style paths.
//!
//! This crate ties the workspace together: the traversal engine from
//! `jxpath-engine`, the filter language from `jxpath-filter` and the scope
//! arena from `jxpath-context`, plus a few JSON reshaping helpers in [`util`].

pub mod error;
pub mod util;

// --- Public API ---
pub use error::JxpathError;
pub use jxpath_engine::{
    Context, ContextId, Contexts, EngineConfig, JsonXpath, Location, Match, Path, Relation,
    Segment, Selector, Slot, Step, Visit, VisitFlow, Visitor, XpathError, evaluate, exists, find,
    from_fn, select, values, visitors,
};

pub use jxpath_context as context;
pub use jxpath_filter as filter;
