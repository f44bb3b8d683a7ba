//! Semantic compilation pipeline for the cue timeline DSL.
//!
//! Takes a parsed [`Program`](cue_ast::Program) and produces the JSON
//! configuration the runtime playback engine consumes:
//!
//! ```text
//! Program AST → link → transform → type check → optimize → emit → Config
//! ```
//!
//! The pipeline is synchronous and fail-fast: the first stage failure is
//! returned as one [`CompileError`] and nothing partial ever escapes.
//! Every compile call builds its own request-scoped state (name registry,
//! output trackers, inline stack); nothing is shared across concurrent
//! compiles.
//!
//! # Example
//!
//! ```ignore
//! let config = cue_compiler::compile(&program, &CompileOptions::default(), &parser, None)?;
//! println!("{}", config.to_json_string(false)?);
//! ```

mod diagnostic;
mod emit;
mod error;
mod linker;
mod optimize;
mod params;
mod registry;
mod resolve;
mod suggest;
mod transform;
mod typecheck;
mod validate;

use std::path::PathBuf;

use cue_ast::Program;
use cue_ir::Config;

pub use diagnostic::{Rendered, Severity};
pub use error::{
    AssetError, CompileError, EmitError, IoError, OptimizationError, ParseError, Result,
    TransformError, TypeCheckError, ValidationError,
};
pub use linker::{DocumentParser, extract_imports, resolve_import};
pub use params::map_positional_to_named;
pub use registry::{
    Category, DefaultValue, OperationSignature, ParamSpec, ParamType, lookup, markers,
    operation_names, outputs, producers_of,
};
pub use resolve::{NameRegistry, ResolvedName};
pub use suggest::{levenshtein, suggest};
pub use validate::{
    OutputTracker, validate_control_flow_pairing, validate_dependencies,
    validate_operation_exists, validate_parameter_count,
};

/// The only emission target this compiler supports today.
pub const SUPPORTED_TARGET: &str = "eligius";

/// Immutable per-compile configuration.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Run the optimizer pipeline after type checking.
    pub optimize: bool,
    /// Compact JSON rendering; consumed by [`Config::to_json_string`].
    pub minify: bool,
    /// Accepted but inert: source maps are a passthrough for a future
    /// toolchain stage.
    pub sourcemap: bool,
    /// Path of the document being compiled. Required to resolve relative
    /// library and asset imports.
    pub source_location: Option<PathBuf>,
    /// Emission target; only [`SUPPORTED_TARGET`] is accepted.
    pub target: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            optimize: true,
            minify: false,
            sourcemap: false,
            source_location: None,
            target: SUPPORTED_TARGET.to_string(),
        }
    }
}

/// Pre-resolved auxiliary assets, produced and owned by the asset-loading
/// collaborator. The compiler splices these values into the output without
/// interpreting them.
#[derive(Debug, Clone, Default)]
pub struct AssetLoadingResult {
    pub layout_template: Option<String>,
    pub styles: Option<String>,
    pub media: Vec<String>,
}

/// Compile a parsed program into a runtime configuration.
///
/// Stages run in order (link, transform, type check, optimize when enabled,
/// emit) and the first failure is returned immediately.
pub fn compile(
    program: &Program,
    options: &CompileOptions,
    parser: &dyn DocumentParser,
    assets: Option<&AssetLoadingResult>,
) -> Result<Config> {
    if options.target != SUPPORTED_TARGET {
        return Err(EmitError {
            message: format!(
                "unsupported target '{}'; this compiler emits '{SUPPORTED_TARGET}' configurations",
                options.target
            ),
            context: "compile options".into(),
            location: program.location,
        }
        .into());
    }

    let libraries = linker::link(program, options.source_location.as_deref(), parser)?;
    let names = NameRegistry::build(program, &libraries);
    let ir = transform::transform(program, &names, assets)?;
    let ir = typecheck::check(ir)?;
    let ir = if options.optimize {
        optimize::optimize(ir)?
    } else {
        ir
    };
    let config = emit::emit(&ir)?;
    Ok(config)
}
