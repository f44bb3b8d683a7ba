/// An argument expression as parsed by the front-end.
///
/// The front-end resolves scoping; by the time the compiler sees a
/// [`Expr::Reference`] it is a plain dotted path (e.g. `$scope.width`
/// arrives as `["scope", "width"]`). The compiler lowers references to
/// literal strings, so no evaluation ever happens on this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    String(String),
    Number(f64),
    Boolean(bool),
    Array(Vec<Expr>),
    Object(Vec<(String, Expr)>),
    /// A `$`-prefixed property chain, split on dots.
    Reference(Vec<String>),
}

impl Expr {
    /// Shorthand for a string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Shorthand for a single-segment reference.
    pub fn reference(segments: &[&str]) -> Self {
        Self::Reference(segments.iter().map(|s| s.to_string()).collect())
    }
}
