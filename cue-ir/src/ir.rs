//! The compiled intermediate form.
//!
//! Invariants upheld by the transformer and relied on downstream:
//!
//! - every [`OperationInvocation::system_name`] exists in the operation
//!   registry; unresolved calls never become IR nodes,
//! - control-flow markers in every operation list are balanced,
//! - operation lists are flat; nesting exists only through markers,
//!   mirroring the runtime's flat operation-list execution model.
//!
//! Stages never share a mutable `Ir`: the type checker and optimizer each
//! consume one value and return a new one.

use cue_ast::{Location, ProviderKind};
use serde_json::{Map, Value};

/// The whole-program intermediate representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Ir {
    /// CSS selector for the runtime mount point.
    pub container_selector: String,
    /// Location of the program header, anchoring whole-program diagnostics.
    pub location: Location,
    /// Pre-resolved layout HTML, spliced in opaquely from the asset loader.
    pub layout_template: Option<String>,
    /// Pre-resolved combined CSS, spliced in opaquely from the asset loader.
    pub styles: Option<String>,
    /// Media uris referenced by the program's assets.
    pub media: Vec<String>,
    /// Actions executed once at startup.
    pub init_actions: Vec<ActionIr>,
    /// Named actions, kept addressable by the runtime (`requestAction`)
    /// even though call sites are inlined.
    pub actions: Vec<ActionIr>,
    pub timelines: Vec<TimelineIr>,
}

/// A compiled action body.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionIr {
    pub name: String,
    /// Whether the action carries an end sequence: declared endable in
    /// source, or a regular body that picked one up by calling an endable
    /// action. An endable action with an empty end sequence is rejected by
    /// the type checker.
    pub endable: bool,
    pub start_operations: Vec<OperationInvocation>,
    /// Empty for regular actions.
    pub end_operations: Vec<OperationInvocation>,
    pub location: Location,
}

/// A compiled timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineIr {
    pub name: String,
    pub provider: ProviderKind,
    pub uri: Option<String>,
    pub events: Vec<EventIr>,
    pub location: Location,
}

/// Symbolic event placement; the emitter resolves it to concrete
/// start/end seconds with a running cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeSpec {
    Timed { start: f64, end: Option<f64> },
    Sequence { duration: f64 },
    Stagger { interval: f64, duration: f64 },
}

/// A compiled event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventIr {
    pub time: TimeSpec,
    pub start_operations: Vec<OperationInvocation>,
    /// End sequences contributed by endable actions called in this event.
    pub end_operations: Vec<OperationInvocation>,
}

/// One invocation of a built-in operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationInvocation {
    pub system_name: String,
    /// Named parameter data, keys in signature declaration order.
    pub operation_data: Map<String, Value>,
    /// Source location of the originating call, for late diagnostics.
    pub location: Location,
}

impl OperationInvocation {
    /// Invocation with empty operation data.
    pub fn bare(system_name: impl Into<String>, location: Location) -> Self {
        Self {
            system_name: system_name.into(),
            operation_data: Map::new(),
            location,
        }
    }
}
