use crate::visitor::{Visit, VisitFlow, Visitor};
use indexmap::IndexSet;
use jxpath_context::Context;
use jxpath_filter::as_text;

/// Collects the distinct texts of all matches, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct DistinctTextVisitor {
    values: IndexSet<String>,
}

impl DistinctTextVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &IndexSet<String> {
        &self.values
    }

    pub fn into_values(self) -> IndexSet<String> {
        self.values
    }
}

impl Visitor for DistinctTextVisitor {
    fn visit(&mut self, _ctx: Context<'_>, visit: Visit<'_>) -> VisitFlow {
        self.values.insert(as_text(visit.matched));
        VisitFlow::Continue
    }
}
