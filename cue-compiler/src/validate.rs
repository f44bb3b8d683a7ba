//! Operation-call validation: existence, arity, dependency satisfaction,
//! and control-flow marker pairing.
//!
//! These entry points accumulate and return every problem found in one
//! pass instead of stopping at the first. The orchestrator above them is
//! fail-fast; the difference is deliberate: editor tooling calls the
//! validators directly and wants the full list.
//!
//! The dependency workflow is order-sensitive: for each operation in a
//! sequence, left to right, call [`validate_dependencies`] first and
//! [`OutputTracker::track`] second. Outputs produced later in the sequence
//! never satisfy an earlier dependency.

use std::collections::HashSet;

use cue_ast::Location;

use crate::error::ValidationError;
use crate::registry::{self, OperationSignature, markers};
use crate::suggest;

/// The set of output names produced so far in one operation sequence.
///
/// Request-scoped: one tracker per sequence, never shared across compiles
/// or across sibling sequences.
#[derive(Debug, Default, Clone)]
pub struct OutputTracker {
    outputs: HashSet<&'static str>,
}

impl OutputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `output` has been produced earlier in the sequence.
    pub fn contains(&self, output: &str) -> bool {
        self.outputs.contains(output)
    }

    /// Record the outputs of an executed operation. Must be called once per
    /// operation, after its own dependencies were validated.
    pub fn track(&mut self, signature: &OperationSignature) {
        self.outputs.extend(signature.outputs);
    }
}

/// Check that `name` is a built-in operation; on failure the error carries
/// suggestions ranked against the registry's name set.
pub fn validate_operation_exists(name: &str, location: Location) -> Option<ValidationError> {
    if registry::lookup(name).is_some() {
        return None;
    }
    let suggestions = suggest::suggest(name, registry::operation_names());
    let hint = suggest::did_you_mean(&suggestions);
    Some(ValidationError::UnknownOperation {
        name: name.to_string(),
        suggestions,
        hint,
        location,
    })
}

/// Check the positional argument count against the signature's bounds:
/// `min` = required parameters, `max` = all parameters, both inclusive.
pub fn validate_parameter_count(
    signature: &OperationSignature,
    actual: usize,
    location: Location,
) -> Option<ValidationError> {
    let min = signature.min_arity();
    let max = signature.max_arity();
    if (min..=max).contains(&actual) {
        return None;
    }
    Some(ValidationError::ParameterCount {
        operation: signature.system_name.to_string(),
        min,
        max,
        actual,
        hint: Some(format!("signature: {}", signature.render())),
        location,
    })
}

/// One error per declared dependency not yet produced in the sequence,
/// each hinting which operation(s) would produce it.
pub fn validate_dependencies(
    signature: &OperationSignature,
    available: &OutputTracker,
    location: Location,
) -> Vec<ValidationError> {
    signature
        .dependencies
        .iter()
        .filter(|dependency| !available.contains(dependency))
        .map(|dependency| {
            let producers = registry::producers_of(dependency);
            let hint = match producers.as_slice() {
                [] => None,
                [only] => Some(format!("'{only}' produces '{dependency}'")),
                many => Some(format!(
                    "produced by one of: {}",
                    many.join(", ")
                )),
            };
            ValidationError::MissingDependency {
                operation: signature.system_name.to_string(),
                dependency: (*dependency).to_string(),
                hint,
                location,
            }
        })
        .collect()
}

/// Stack-based pairing scan over an ordered list of operation names.
///
/// This checks pairing only, not nesting order: a close marker matches the
/// nearest open marker of its kind anywhere on the stack, so
/// interleaved-but-balanced sequences pass. Nesting order is already
/// guaranteed by the AST shape upstream; tightening this would reject
/// programs the runtime accepts.
pub fn validate_control_flow_pairing(
    operations: &[(&str, Location)],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut stack: Vec<(&str, Location)> = Vec::new();

    for &(name, location) in operations {
        match name {
            markers::WHEN | markers::FOR_EACH => stack.push((name, location)),
            markers::OTHERWISE => {
                if stack.last().map(|(open, _)| *open) != Some(markers::WHEN) {
                    errors.push(ValidationError::InvalidOtherwise { location });
                }
            }
            markers::END_WHEN => close_marker(&mut stack, &mut errors, markers::WHEN, name, location),
            markers::END_FOR_EACH => {
                close_marker(&mut stack, &mut errors, markers::FOR_EACH, name, location)
            }
            _ => {}
        }
    }

    for (open, location) in stack {
        errors.push(ValidationError::UnclosedMarker {
            operation: open.to_string(),
            hint: Some(format!("add '{}' to close it", closing_of(open))),
            location,
        });
    }
    errors
}

fn close_marker(
    stack: &mut Vec<(&str, Location)>,
    errors: &mut Vec<ValidationError>,
    opening: &str,
    name: &str,
    location: Location,
) {
    match stack.iter().rposition(|(open, _)| *open == opening) {
        Some(index) => {
            stack.remove(index);
        }
        None => errors.push(ValidationError::UnmatchedMarker {
            operation: name.to_string(),
            hint: Some(format!("no '{opening}' is open at this point")),
            location,
        }),
    }
}

fn closing_of(open: &str) -> &'static str {
    if open == markers::WHEN {
        markers::END_WHEN
    } else {
        markers::END_FOR_EACH
    }
}
