//! Program, library, timeline, and statement nodes.
//!
//! These mirror the grammar of the cue source language one-to-one. The
//! compiler never mutates them; a parsed [`Document`] is owned by the caller
//! for the duration of one compile.

use crate::{Expr, Location};

/// Root of a parsed source file.
///
/// A program file opens with the `experience` keyword, a library file with
/// the `library` keyword. Importing a program as a library is an error the
/// compiler reports with a hint naming the expected keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Program(Program),
    Library(Library),
}

/// A complete authored experience: container, imports, setup, actions, and
/// timelines.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    /// CSS selector for the element the runtime mounts into.
    pub container_selector: String,
    pub imports: Vec<Import>,
    /// Statements executed once at startup, before any timeline plays.
    pub setup: Vec<Statement>,
    pub actions: Vec<ActionDefinition>,
    pub timelines: Vec<Timeline>,
    pub location: Location,
}

/// A standalone document exporting actions for import by other documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    pub name: String,
    pub actions: Vec<ActionDefinition>,
    pub location: Location,
}

/// An `import "path"` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    /// The literal path as written in the source, always relative.
    pub path: String,
    pub location: Location,
}

/// A user-defined named sequence of operations.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDefinition {
    pub name: String,
    /// Named parameters bound to call-site arguments when the action is
    /// inlined.
    pub parameters: Vec<String>,
    pub body: ActionBody,
    pub location: Location,
}

/// Regular actions have one body; endable actions have separate start and
/// end sequences (the end sequence runs when the owning event's interval
/// ends).
#[derive(Debug, Clone, PartialEq)]
pub enum ActionBody {
    Regular(Vec<Statement>),
    Endable {
        start: Vec<Statement>,
        end: Vec<Statement>,
    },
}

/// Playback provider a timeline is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Video,
    Audio,
    RequestAnimationFrame,
    Custom,
}

impl ProviderKind {
    /// Provider name as it appears in source and in emitted configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::RequestAnimationFrame => "raf",
            Self::Custom => "custom",
        }
    }
}

/// A named sequence of events bound to a playback provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub name: String,
    pub provider: ProviderKind,
    /// Media uri for video/audio providers. Must be absent for raf/custom.
    pub source: Option<String>,
    pub events: Vec<Event>,
    pub location: Location,
}

/// How an event is placed on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// Explicit start time, optional end time, in seconds.
    Timed { start: f64, end: Option<f64> },
    /// Starts when the previous event's interval ends.
    Sequence { duration: f64 },
    /// Like sequence, but the next event starts `interval` seconds after
    /// this one started rather than after it ended.
    Stagger { interval: f64, duration: f64 },
}

/// One timeline event and its operation statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub body: Vec<Statement>,
    pub location: Location,
}

/// A statement inside an event, setup block, or action body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Call(CallStatement),
    If(IfStatement),
    For(ForStatement),
    Break { location: Location },
    Continue { location: Location },
}

impl Statement {
    /// The source location of this statement.
    pub fn location(&self) -> Location {
        match self {
            Self::Call(call) => call.location,
            Self::If(stmt) => stmt.location,
            Self::For(stmt) => stmt.location,
            Self::Break { location } | Self::Continue { location } => *location,
        }
    }
}

/// A call to either a built-in operation or a user-defined action. Which of
/// the two it is gets decided during name resolution, with user actions
/// shadowing built-ins.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStatement {
    pub name: String,
    pub arguments: Vec<Expr>,
    pub location: Location,
}

/// `if` / `else`, lowered to `when`/`otherwise`/`endWhen` markers.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_body: Vec<Statement>,
    pub else_body: Option<Vec<Statement>>,
    pub location: Location,
}

/// `for` over a collection, lowered to `forEach`/`endForEach` markers.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub collection: Expr,
    pub body: Vec<Statement>,
    pub location: Location,
}
