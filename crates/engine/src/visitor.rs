//! The callback interface the engine drives at every accepted match.
use crate::location::Slot;
use jxpath_context::Context;
use serde_json::Value;

/// What the engine should do after a visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitFlow {
    Continue,
    /// This pair could not be handled. Logged, and the next pair is visited.
    Skip { reason: String },
    /// No further pairs of the current segment are visited.
    Stop,
}

impl VisitFlow {
    pub fn skip(reason: impl Into<String>) -> Self {
        Self::Skip {
            reason: reason.into(),
        }
    }
}

/// One accepted match, as handed to a visitor.
#[derive(Debug)]
pub struct Visit<'a> {
    /// The container holding the match, borrowed mutably for edits.
    pub parent: &'a mut Value,
    /// Where the match sits in `parent`. Array indices are realigned when
    /// earlier visits of the segment shifted the elements.
    pub slot: &'a Slot,
    /// The match as it was when the segment was scanned.
    pub matched: &'a Value,
}

pub trait Visitor {
    fn visit(&mut self, ctx: Context<'_>, visit: Visit<'_>) -> VisitFlow;
}

impl<F> Visitor for F
where
    F: FnMut(Context<'_>, Visit<'_>) -> VisitFlow,
{
    fn visit(&mut self, ctx: Context<'_>, visit: Visit<'_>) -> VisitFlow {
        self(ctx, visit)
    }
}

/// Wraps a closure as a visitor, letting the compiler infer its argument types.
pub fn from_fn<F>(f: F) -> F
where
    F: FnMut(Context<'_>, Visit<'_>) -> VisitFlow,
{
    f
}
