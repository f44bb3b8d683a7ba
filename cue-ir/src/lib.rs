//! Intermediate representation and output types for the cue compiler.
//!
//! This crate provides the two structured forms a program passes through
//! after transformation:
//!
//! ```text
//! cue-ast (parsed program) → cue-compiler (transform) → Ir → Config (JSON)
//! ```
//!
//! [`Ir`] is the compiler-internal form: event times stay symbolic and
//! control flow is encoded as flat, balanced marker operations. [`Config`]
//! is the JSON configuration schema the runtime playback engine consumes.

mod config;
mod ir;

pub use config::{Config, ConfigAction, ConfigOperation, ConfigTimeline, ConfigTimelineAction};
pub use ir::{ActionIr, EventIr, Ir, OperationInvocation, TimeSpec, TimelineIr};
