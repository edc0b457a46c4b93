use serde::Deserialize;

/// Tuning knobs for a [`JsonXpath`](crate::JsonXpath) engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// The deepest nesting the engine will walk, counted in tree levels for
    /// descendant searches and in path segments for path recursion.
    ///
    /// Exceeding it aborts the call with `XpathError::DepthExceeded` instead of
    /// overflowing the stack on pathological documents.
    ///
    /// Defaults to `512`.
    pub max_depth: usize,

    /// How many compiled filter regexes are kept per engine.
    ///
    /// - **Higher values**: repeated `matches(...)` patterns are compiled once.
    /// - **`0`**: every call compiles its pattern again.
    ///
    /// Defaults to `64`.
    pub regex_cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 512,
            regex_cache_capacity: 64,
        }
    }
}
