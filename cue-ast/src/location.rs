use serde::Serialize;

/// A source position attached to every AST node and every diagnostic.
///
/// Lines and columns are 1-based. `length` is the span of the offending
/// token in characters when the front-end knows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
    pub length: Option<u32>,
}

impl Location {
    /// Create a location without a known span length.
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            length: None,
        }
    }

    /// Create a location spanning `length` characters.
    pub fn span(line: u32, column: u32, length: u32) -> Self {
        Self {
            line,
            column,
            length: Some(length),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
