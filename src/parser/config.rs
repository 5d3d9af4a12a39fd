/// Nesting limit used by [`ParserConfig::default`]
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of nested expression levels before the parser gives up
    /// with a syntax error.
    pub max_depth: usize,
}

impl ParserConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
