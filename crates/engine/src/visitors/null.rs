use crate::visitor::{Visit, VisitFlow, Visitor};
use jxpath_context::Context;

/// Visits nothing, for read-only evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullVisitor;

impl Visitor for NullVisitor {
    fn visit(&mut self, _ctx: Context<'_>, _visit: Visit<'_>) -> VisitFlow {
        VisitFlow::Continue
    }
}
