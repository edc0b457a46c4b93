//! Ready-made visitors.
mod debug;
mod distinct_text;
mod null;
mod remove_field;
mod replace_text;

pub use debug::DebugVisitor;
pub use distinct_text::DistinctTextVisitor;
pub use null::NullVisitor;
pub use remove_field::RemoveFieldVisitor;
pub use replace_text::ReplaceTextVisitor;
