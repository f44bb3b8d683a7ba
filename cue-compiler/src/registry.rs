//! Static table of built-in operation signatures.
//!
//! The registry is the single source of truth for what the runtime can
//! execute: each signature declares its parameters (with required/optional
//! flags and defaults), the outputs it adds to the running sequence, and
//! the prior outputs it depends on. The table is immutable; per-compile
//! state lives in request-scoped structures elsewhere.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::Value;

/// Control-flow marker names, paired begin/end plus the `otherwise` branch
/// marker. These are ordinary registry operations on the wire; the
/// transformer emits them when lowering `if`/`for` statements.
pub mod markers {
    pub const WHEN: &str = "when";
    pub const OTHERWISE: &str = "otherwise";
    pub const END_WHEN: &str = "endWhen";
    pub const FOR_EACH: &str = "forEach";
    pub const END_FOR_EACH: &str = "endForEach";
    pub const BREAK: &str = "breakLoop";
    pub const CONTINUE: &str = "continueLoop";
}

/// Output names produced and consumed by operations.
pub mod outputs {
    pub const SELECTED_ELEMENT: &str = "selectedElement";
    pub const CONTROLLER_INSTANCE: &str = "controllerInstance";
    pub const TEMPLATE: &str = "template";
    pub const JSON: &str = "json";
    pub const ACTION_INSTANCE: &str = "actionInstance";
}

/// Coarse grouping used by tooling (completion lists, docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Element,
    ControlFlow,
    Data,
    Controller,
    Timing,
    Diagnostics,
}

/// Declared type of a parameter. Advisory today: arguments arrive as
/// pre-lowered JSON values and the runtime coerces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

/// A default value storable in a `const` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Str(&'static str),
    Number(f64),
    Boolean(bool),
}

impl DefaultValue {
    /// The JSON value spliced into operation data when the argument is
    /// omitted.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Str(s) => Value::String((*s).to_string()),
            Self::Number(n) => Value::from(*n),
            Self::Boolean(b) => Value::Bool(*b),
        }
    }
}

/// One named parameter of an operation signature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
    pub required: bool,
    pub default: Option<DefaultValue>,
}

const fn required(name: &'static str, ty: ParamType) -> ParamSpec {
    ParamSpec {
        name,
        ty,
        required: true,
        default: None,
    }
}

const fn optional(name: &'static str, ty: ParamType) -> ParamSpec {
    ParamSpec {
        name,
        ty,
        required: false,
        default: None,
    }
}

const fn optional_with(name: &'static str, ty: ParamType, default: DefaultValue) -> ParamSpec {
    ParamSpec {
        name,
        ty,
        required: false,
        default: Some(default),
    }
}

/// The full signature of one built-in operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationSignature {
    pub system_name: &'static str,
    /// Declaration order doubles as positional argument order.
    pub parameters: &'static [ParamSpec],
    /// Output names that must have been produced earlier in the sequence.
    pub dependencies: &'static [&'static str],
    /// Output names this operation adds to the sequence.
    pub outputs: &'static [&'static str],
    pub category: Category,
}

impl OperationSignature {
    /// Minimum accepted argument count: the number of required parameters.
    pub fn min_arity(&self) -> usize {
        self.parameters.iter().filter(|p| p.required).count()
    }

    /// Maximum accepted argument count: the total parameter count.
    pub fn max_arity(&self) -> usize {
        self.parameters.len()
    }

    /// Render the signature for hints: required parameters bare, optional
    /// parameters bracketed, e.g. `selectElement(selector, [useRoot])`.
    pub fn render(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                if p.required {
                    p.name.to_string()
                } else {
                    format!("[{}]", p.name)
                }
            })
            .collect();
        format!("{}({})", self.system_name, params.join(", "))
    }
}

use Category::*;
use DefaultValue as D;
use ParamType as T;
use markers as m;
use outputs as o;

/// Every operation the target runtime ships. Order is stable for tooling.
pub const OPERATIONS: &[OperationSignature] = &[
    OperationSignature {
        system_name: "selectElement",
        parameters: &[
            required("selector", T::String),
            optional_with("useSelectedElementAsRoot", T::Boolean, D::Boolean(false)),
        ],
        dependencies: &[],
        outputs: &[o::SELECTED_ELEMENT],
        category: Element,
    },
    OperationSignature {
        system_name: "addClass",
        parameters: &[required("className", T::String)],
        dependencies: &[o::SELECTED_ELEMENT],
        outputs: &[],
        category: Element,
    },
    OperationSignature {
        system_name: "removeClass",
        parameters: &[required("className", T::String)],
        dependencies: &[o::SELECTED_ELEMENT],
        outputs: &[],
        category: Element,
    },
    OperationSignature {
        system_name: "toggleClass",
        parameters: &[required("className", T::String)],
        dependencies: &[o::SELECTED_ELEMENT],
        outputs: &[],
        category: Element,
    },
    OperationSignature {
        system_name: "setStyle",
        parameters: &[required("properties", T::Object)],
        dependencies: &[o::SELECTED_ELEMENT],
        outputs: &[],
        category: Element,
    },
    OperationSignature {
        system_name: "animate",
        parameters: &[
            required("properties", T::Object),
            required("duration", T::Number),
            optional_with("easing", T::String, D::Str("linear")),
        ],
        dependencies: &[o::SELECTED_ELEMENT],
        outputs: &[],
        category: Element,
    },
    OperationSignature {
        system_name: "setElementContent",
        parameters: &[
            required("content", T::String),
            optional_with("insertionType", T::String, D::Str("overwrite")),
        ],
        dependencies: &[o::SELECTED_ELEMENT],
        outputs: &[],
        category: Element,
    },
    OperationSignature {
        system_name: "setElementAttributes",
        parameters: &[required("attributes", T::Object)],
        dependencies: &[o::SELECTED_ELEMENT],
        outputs: &[],
        category: Element,
    },
    OperationSignature {
        system_name: "clearElement",
        parameters: &[],
        dependencies: &[o::SELECTED_ELEMENT],
        outputs: &[],
        category: Element,
    },
    OperationSignature {
        system_name: "createElement",
        parameters: &[
            required("elementName", T::String),
            optional("attributes", T::Object),
        ],
        dependencies: &[],
        outputs: &[o::TEMPLATE],
        category: Element,
    },
    OperationSignature {
        system_name: "wait",
        parameters: &[required("milliseconds", T::Number)],
        dependencies: &[],
        outputs: &[],
        category: Timing,
    },
    OperationSignature {
        system_name: "broadcastEvent",
        parameters: &[
            required("eventName", T::String),
            optional("eventArgs", T::Array),
        ],
        dependencies: &[],
        outputs: &[],
        category: Data,
    },
    OperationSignature {
        system_name: "getControllerInstance",
        parameters: &[required("systemName", T::String)],
        dependencies: &[],
        outputs: &[o::CONTROLLER_INSTANCE],
        category: Controller,
    },
    OperationSignature {
        system_name: "addControllerToElement",
        parameters: &[],
        dependencies: &[o::SELECTED_ELEMENT, o::CONTROLLER_INSTANCE],
        outputs: &[],
        category: Controller,
    },
    OperationSignature {
        system_name: "removeControllerFromElement",
        parameters: &[required("controllerName", T::String)],
        dependencies: &[o::SELECTED_ELEMENT],
        outputs: &[],
        category: Controller,
    },
    OperationSignature {
        system_name: "setGlobalData",
        parameters: &[required("properties", T::Object)],
        dependencies: &[],
        outputs: &[],
        category: Data,
    },
    OperationSignature {
        system_name: "setOperationData",
        parameters: &[
            required("properties", T::Object),
            optional_with("override", T::Boolean, D::Boolean(false)),
        ],
        dependencies: &[],
        outputs: &[],
        category: Data,
    },
    OperationSignature {
        system_name: "clearOperationData",
        parameters: &[optional("properties", T::Array)],
        dependencies: &[],
        outputs: &[],
        category: Data,
    },
    OperationSignature {
        system_name: "loadJson",
        parameters: &[
            required("url", T::String),
            optional_with("cache", T::Boolean, D::Boolean(true)),
        ],
        dependencies: &[],
        outputs: &[o::JSON],
        category: Data,
    },
    OperationSignature {
        system_name: "requestAction",
        parameters: &[required("systemName", T::String)],
        dependencies: &[],
        outputs: &[o::ACTION_INSTANCE],
        category: Data,
    },
    OperationSignature {
        system_name: "log",
        parameters: &[optional("message", T::String)],
        dependencies: &[],
        outputs: &[],
        category: Diagnostics,
    },
    OperationSignature {
        system_name: m::WHEN,
        parameters: &[required("expression", T::String)],
        dependencies: &[],
        outputs: &[],
        category: ControlFlow,
    },
    OperationSignature {
        system_name: m::OTHERWISE,
        parameters: &[],
        dependencies: &[],
        outputs: &[],
        category: ControlFlow,
    },
    OperationSignature {
        system_name: m::END_WHEN,
        parameters: &[],
        dependencies: &[],
        outputs: &[],
        category: ControlFlow,
    },
    OperationSignature {
        system_name: m::FOR_EACH,
        parameters: &[required("collection", T::Array)],
        dependencies: &[],
        outputs: &[],
        category: ControlFlow,
    },
    OperationSignature {
        system_name: m::END_FOR_EACH,
        parameters: &[],
        dependencies: &[],
        outputs: &[],
        category: ControlFlow,
    },
    OperationSignature {
        system_name: m::BREAK,
        parameters: &[],
        dependencies: &[],
        outputs: &[],
        category: ControlFlow,
    },
    OperationSignature {
        system_name: m::CONTINUE,
        parameters: &[],
        dependencies: &[],
        outputs: &[],
        category: ControlFlow,
    },
];

static INDEX: LazyLock<HashMap<&'static str, &'static OperationSignature>> =
    LazyLock::new(|| OPERATIONS.iter().map(|sig| (sig.system_name, sig)).collect());

/// Look up a signature by its system name.
pub fn lookup(name: &str) -> Option<&'static OperationSignature> {
    INDEX.get(name).copied()
}

/// All built-in operation names, in table order.
pub fn operation_names() -> impl Iterator<Item = &'static str> {
    OPERATIONS.iter().map(|sig| sig.system_name)
}

/// The operations that produce `output`, for dependency hints.
pub fn producers_of(output: &str) -> Vec<&'static str> {
    OPERATIONS
        .iter()
        .filter(|sig| sig.outputs.contains(&output))
        .map(|sig| sig.system_name)
        .collect()
}
