//! Positional-to-named parameter mapping.
//!
//! Arguments reach this point pre-lowered to plain JSON values: reference
//! expressions have already become literal strings. No evaluation happens
//! here; the mapper only lines arguments up with the signature's parameter
//! order.

use cue_ast::Location;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::registry::OperationSignature;

/// Build the `operationData` object for one call.
///
/// Rules, per parameter in declaration order:
/// - supplied argument → inserted under the parameter name,
/// - missing required → one [`ValidationError::MissingParameter`] each,
/// - missing optional with a default → the default is inserted,
/// - missing optional without a default → the key is omitted entirely,
///   never emitted as null.
///
/// Surplus arguments are a parameter-count error caught before mapping.
pub fn map_positional_to_named(
    signature: &OperationSignature,
    arguments: &[Value],
    location: Location,
) -> Result<Map<String, Value>, Vec<ValidationError>> {
    let mut data = Map::new();
    let mut errors = Vec::new();

    for (index, parameter) in signature.parameters.iter().enumerate() {
        match arguments.get(index) {
            Some(value) => {
                data.insert(parameter.name.to_string(), value.clone());
            }
            None if parameter.required => {
                errors.push(ValidationError::MissingParameter {
                    operation: signature.system_name.to_string(),
                    parameter: parameter.name.to_string(),
                    hint: Some(format!("signature: {}", signature.render())),
                    location,
                });
            }
            None => {
                if let Some(default) = &parameter.default {
                    data.insert(parameter.name.to_string(), default.to_value());
                }
            }
        }
    }

    if errors.is_empty() { Ok(data) } else { Err(errors) }
}
