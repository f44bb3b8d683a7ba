//! IR-to-configuration serialization.
//!
//! Pure lowering into the runtime's JSON schema. Event times become
//! concrete here: a running cursor per timeline resolves sequence and
//! stagger placement. Marker balance is guaranteed upstream by the
//! validator and is not re-checked; the only defensive check is for IR
//! that is structurally impossible after a successful transform.

use cue_ir::{
    ActionIr, Config, ConfigAction, ConfigOperation, ConfigTimeline, ConfigTimelineAction, Ir,
    OperationInvocation, TimeSpec,
};
use serde_json::Value;

use crate::error::EmitError;

/// Serialize the final IR into the runtime configuration.
pub fn emit(ir: &Ir) -> Result<Config, EmitError> {
    let init_actions = ir
        .init_actions
        .iter()
        .map(|action| emit_action(action, "init action"))
        .collect::<Result<_, _>>()?;
    let actions = ir
        .actions
        .iter()
        .map(|action| emit_action(action, "action"))
        .collect::<Result<_, _>>()?;

    let mut timelines = Vec::with_capacity(ir.timelines.len());
    for timeline in &ir.timelines {
        let context = format!("timeline '{}'", timeline.name);
        let mut cursor = 0.0f64;
        let mut timeline_actions = Vec::with_capacity(timeline.events.len());
        for event in &timeline.events {
            let (start_time, end_time) = match event.time {
                TimeSpec::Timed { start, end } => {
                    let end = end.unwrap_or(start);
                    cursor = end;
                    (start, end)
                }
                TimeSpec::Sequence { duration } => {
                    let start = cursor;
                    cursor = start + duration;
                    (start, cursor)
                }
                TimeSpec::Stagger { interval, duration } => {
                    let start = cursor;
                    cursor = start + interval;
                    (start, start + duration)
                }
            };
            timeline_actions.push(ConfigTimelineAction {
                start_time,
                end_time,
                start_operations: emit_operations(&event.start_operations, &context)?,
                end_operations: if event.end_operations.is_empty() {
                    None
                } else {
                    Some(emit_operations(&event.end_operations, &context)?)
                },
            });
        }
        timelines.push(ConfigTimeline {
            provider: timeline.provider.as_str().to_string(),
            uri: timeline.uri.clone(),
            timeline_actions,
        });
    }

    Ok(Config {
        container_selector: ir.container_selector.clone(),
        layout_template: ir.layout_template.clone(),
        styles: ir.styles.clone(),
        media: ir.media.clone(),
        init_actions,
        actions,
        timelines,
    })
}

fn emit_action(action: &ActionIr, kind: &str) -> Result<ConfigAction, EmitError> {
    let context = format!("{kind} '{}'", action.name);
    Ok(ConfigAction {
        name: action.name.clone(),
        start_operations: emit_operations(&action.start_operations, &context)?,
        end_operations: if action.endable {
            Some(emit_operations(&action.end_operations, &context)?)
        } else {
            None
        },
    })
}

fn emit_operations(
    operations: &[OperationInvocation],
    context: &str,
) -> Result<Vec<ConfigOperation>, EmitError> {
    operations
        .iter()
        .map(|operation| {
            if operation.system_name.is_empty() {
                return Err(EmitError {
                    message: "operation invocation with an empty system name".into(),
                    context: context.to_string(),
                    location: operation.location,
                });
            }
            Ok(ConfigOperation {
                system_name: operation.system_name.clone(),
                operation_data: Value::Object(operation.operation_data.clone()),
            })
        })
        .collect()
}
