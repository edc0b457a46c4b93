use crate::visitor::{Visit, VisitFlow, Visitor};
use jxpath_context::Context;

/// Logs every match at debug level without touching the tree.
#[derive(Debug, Clone)]
pub struct DebugVisitor {
    path: String,
    verbose: bool,
}

impl DebugVisitor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            verbose: false,
        }
    }

    /// Also logs the parent of each match.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Visitor for DebugVisitor {
    fn visit(&mut self, ctx: Context<'_>, visit: Visit<'_>) -> VisitFlow {
        log::debug!("Found node for '{}'{}: {}", self.path, ctx, visit.matched);
        if self.verbose {
            log::debug!("Parent of the node at {}: {}", visit.slot, visit.parent);
        }
        VisitFlow::Continue
    }
}
