//! The compiler's closed error taxonomy.
//!
//! One enum per stage plus the top-level [`CompileError`] union. Every
//! variant is an immutable record carrying a message, a source
//! [`Location`], and an optional human hint (surfaced through miette's
//! `help`). Errors are values, never control flow for the happy path.
//!
//! The orchestrator is fail-fast: one compile returns at most one
//! `CompileError`. The operation and control-flow validators internally
//! accumulate and return every problem they find in one pass
//! ([`ValidationError`] vectors); their callers decide how many to surface.
//! That granularity difference is intentional and load-bearing for editor
//! tooling built on the validators.

use std::path::PathBuf;

use cue_ast::Location;
use miette::Diagnostic;
use thiserror::Error;

/// Result alias used across the compiler.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Top-level error union returned by [`crate::compile`].
#[derive(Debug, Error, Diagnostic)]
pub enum CompileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Type(#[from] TypeCheckError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Optimization(#[from] OptimizationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),
}

impl CompileError {
    /// The source location this error points at.
    pub fn location(&self) -> Location {
        match self {
            Self::Parse(e) => e.location,
            Self::Transform(e) => e.location(),
            Self::Type(e) => e.location,
            Self::Optimization(e) => e.location,
            Self::Emit(e) => e.location,
            Self::Asset(e) => e.location(),
            Self::Io(e) => e.location(),
        }
    }
}

/// Front-end parse failure. Produced here only when library loading
/// re-invokes the external parser.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(cue::parse_error))]
pub struct ParseError {
    pub message: String,
    pub location: Location,
    #[help]
    pub hint: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Failures while lowering the AST to IR.
#[derive(Debug, Error, Diagnostic)]
pub enum TransformError {
    /// Defensive: unreachable with a conforming front-end, kept so a
    /// non-conforming one fails loudly instead of panicking.
    #[error("no transformation rule for '{node}' node")]
    #[diagnostic(code(cue::transform::unknown_node))]
    UnknownNode { node: String, location: Location },

    #[error("invalid timeline '{name}': {reason}")]
    #[diagnostic(code(cue::transform::invalid_timeline))]
    InvalidTimeline {
        name: String,
        reason: String,
        location: Location,
    },

    #[error("program has no container selector")]
    #[diagnostic(
        code(cue::transform::missing_container),
        help("declare a container selector, e.g. container \"#app\"")
    )]
    MissingContainer { location: Location },

    #[error("action '{action}' expands into itself")]
    #[diagnostic(
        code(cue::transform::recursive_inlining),
        help("inlining chain: {chain}; actions are inlined at every call site, so a cycle would expand forever")
    )]
    RecursiveInlining {
        action: String,
        chain: String,
        location: Location,
    },

    #[error("duplicate action name '{name}'")]
    #[diagnostic(
        code(cue::transform::duplicate_action),
        help("'{name}' is defined in both {first} and {second}; rename one of them")
    )]
    DuplicateAction {
        name: String,
        first: String,
        second: String,
        location: Location,
    },

    #[error("'break' outside of a for loop")]
    #[diagnostic(
        code(cue::transform::stray_break),
        help("break is only valid inside a for body")
    )]
    BreakOutsideLoop { location: Location },

    #[error("'continue' outside of a for loop")]
    #[diagnostic(
        code(cue::transform::stray_continue),
        help("continue is only valid inside a for body")
    )]
    ContinueOutsideLoop { location: Location },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Call(#[from] ValidationError),
}

impl TransformError {
    pub fn location(&self) -> Location {
        match self {
            Self::UnknownNode { location, .. }
            | Self::InvalidTimeline { location, .. }
            | Self::MissingContainer { location }
            | Self::RecursiveInlining { location, .. }
            | Self::DuplicateAction { location, .. }
            | Self::BreakOutsideLoop { location }
            | Self::ContinueOutsideLoop { location } => *location,
            Self::Call(e) => e.location(),
        }
    }
}

/// Call-site validation failures from the name resolver, operation
/// validator, and parameter mapper.
///
/// Unlike the orchestrator, validator entry points return *all* problems
/// found in one pass; see the module docs.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum ValidationError {
    /// A call name that is neither a user action nor a built-in operation.
    #[error("unknown name '{name}'")]
    #[diagnostic(code(cue::validate::unknown_name))]
    UnknownName {
        name: String,
        /// Known action names within Levenshtein distance 3, ascending.
        suggestions: Vec<String>,
        #[help]
        hint: Option<String>,
        location: Location,
    },

    #[error("unknown operation '{name}'")]
    #[diagnostic(code(cue::validate::unknown_operation))]
    UnknownOperation {
        name: String,
        suggestions: Vec<String>,
        #[help]
        hint: Option<String>,
        location: Location,
    },

    #[error("operation '{operation}' expects {} arguments, got {actual}", render_bounds(.min, .max))]
    #[diagnostic(code(cue::validate::parameter_count))]
    ParameterCount {
        operation: String,
        min: usize,
        max: usize,
        actual: usize,
        /// Renders the signature: required parameters bare, optional ones
        /// bracketed.
        #[help]
        hint: Option<String>,
        location: Location,
    },

    #[error("operation '{operation}' requires '{dependency}', which no earlier operation produced")]
    #[diagnostic(code(cue::validate::missing_dependency))]
    MissingDependency {
        operation: String,
        dependency: String,
        #[help]
        hint: Option<String>,
        location: Location,
    },

    #[error("'{operation}' is never closed")]
    #[diagnostic(code(cue::validate::unclosed_marker))]
    UnclosedMarker {
        operation: String,
        #[help]
        hint: Option<String>,
        location: Location,
    },

    #[error("'{operation}' has no matching opening marker")]
    #[diagnostic(code(cue::validate::unmatched_marker))]
    UnmatchedMarker {
        operation: String,
        #[help]
        hint: Option<String>,
        location: Location,
    },

    #[error("'otherwise' outside of a 'when' block")]
    #[diagnostic(
        code(cue::validate::invalid_otherwise),
        help("an otherwise branch is only valid between 'when' and 'endWhen'")
    )]
    InvalidOtherwise { location: Location },

    #[error("operation '{operation}' is missing required parameter '{parameter}'")]
    #[diagnostic(code(cue::validate::missing_parameter))]
    MissingParameter {
        operation: String,
        parameter: String,
        #[help]
        hint: Option<String>,
        location: Location,
    },
}

fn render_bounds(min: &usize, max: &usize) -> String {
    if min == max {
        format!("{min}")
    } else {
        format!("{min} to {max}")
    }
}

impl ValidationError {
    pub fn location(&self) -> Location {
        match self {
            Self::UnknownName { location, .. }
            | Self::UnknownOperation { location, .. }
            | Self::ParameterCount { location, .. }
            | Self::MissingDependency { location, .. }
            | Self::UnclosedMarker { location, .. }
            | Self::UnmatchedMarker { location, .. }
            | Self::InvalidOtherwise { location }
            | Self::MissingParameter { location, .. } => *location,
        }
    }
}

/// Whole-IR consistency failures found after transformation.
#[derive(Debug, Error, Diagnostic)]
#[error("type mismatch: expected {expected}, found {actual}")]
#[diagnostic(code(cue::typecheck))]
pub struct TypeCheckError {
    pub expected: String,
    pub actual: String,
    pub location: Location,
    #[help]
    pub hint: Option<String>,
}

/// An optimization pass failed; names the pass so the failure is
/// attributable.
#[derive(Debug, Error, Diagnostic)]
#[error("optimization pass '{pass}' failed: {message}")]
#[diagnostic(code(cue::optimize))]
pub struct OptimizationError {
    pub pass: String,
    pub message: String,
    pub location: Location,
}

/// Structurally invalid IR reached the emitter. Defensive: unreachable when
/// upstream stages succeeded.
#[derive(Debug, Error, Diagnostic)]
#[error("cannot emit configuration: {message}")]
#[diagnostic(code(cue::emit))]
pub struct EmitError {
    pub message: String,
    /// Which part of the IR the failure was found in.
    pub context: String,
    pub location: Location,
}

/// Auxiliary asset import failures, produced by the asset-loading
/// collaborator and representable on the compiler's error surface.
#[derive(Debug, Error, Diagnostic)]
pub enum AssetError {
    #[error("failed to import html layout: {message}")]
    #[diagnostic(code(cue::asset::html))]
    Html { message: String, location: Location },

    #[error("failed to import stylesheet: {message}")]
    #[diagnostic(code(cue::asset::css))]
    Css { message: String, location: Location },

    #[error("failed to import media '{uri}': {message}")]
    #[diagnostic(code(cue::asset::media))]
    Media {
        uri: String,
        message: String,
        location: Location,
    },
}

impl AssetError {
    pub fn location(&self) -> Location {
        match self {
            Self::Html { location, .. }
            | Self::Css { location, .. }
            | Self::Media { location, .. } => *location,
        }
    }
}

/// File-system failures while resolving and loading library imports.
#[derive(Debug, Error, Diagnostic)]
pub enum IoError {
    #[error("file not found: {path}")]
    #[diagnostic(
        code(cue::io::not_found),
        help("the path is resolved relative to the importing document")
    )]
    FileNotFound { path: PathBuf, location: Location },

    #[error("permission denied reading {path}")]
    #[diagnostic(code(cue::io::permission))]
    Permission { path: PathBuf, location: Location },

    #[error("failed to read {path}: {message}")]
    #[diagnostic(code(cue::io::read))]
    Read {
        path: PathBuf,
        message: String,
        location: Location,
    },

    #[error("refusing to load '{path}'")]
    #[diagnostic(
        code(cue::io::security),
        help("import paths must be relative to the importing document")
    )]
    Security { path: String, location: Location },
}

impl IoError {
    pub fn location(&self) -> Location {
        match self {
            Self::FileNotFound { location, .. }
            | Self::Permission { location, .. }
            | Self::Read { location, .. }
            | Self::Security { location, .. } => *location,
        }
    }
}
