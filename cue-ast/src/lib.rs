//! Abstract syntax tree types for the cue timeline DSL.
//!
//! This crate provides the node types produced by the external front-end
//! (lexer/parser) and consumed read-only by the compiler. It carries no
//! parsing logic of its own.
//!
//! # Architecture
//!
//! ```text
//! .cue source → front-end (parsing) → cue-ast (this crate) → cue-compiler → Config
//! ```
//!
//! All nodes carry a [`Location`] pointing back at the source span they were
//! parsed from; every compiler diagnostic is anchored on these locations.

mod expr;
mod location;
mod node;

pub use expr::Expr;
pub use location::Location;
pub use node::{
    ActionBody, ActionDefinition, CallStatement, Document, Event, EventKind, ForStatement,
    IfStatement, Import, Library, Program, ProviderKind, Statement, Timeline,
};
