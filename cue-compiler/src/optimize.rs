//! IR-to-IR optimization passes.
//!
//! Every pass is semantically transparent and idempotent: running the
//! optimizer zero or more times yields IR the emitter treats identically.
//! Passes operate on the flat marker-encoded operation lists and rely on
//! the balance invariant upheld by the validator; a violated invariant is
//! an [`OptimizationError`] naming the pass, never a panic.

use cue_ast::Location;
use cue_ir::{Ir, OperationInvocation};
use serde_json::Value;

use crate::error::OptimizationError;
use crate::registry::markers;

type PassFn = fn(&mut Vec<OperationInvocation>) -> Result<(), String>;

/// The pass pipeline, applied in order to every operation list in the IR.
const PASSES: &[(&str, PassFn)] = &[
    ("dead-branches", dead_branches),
    ("empty-markers", empty_markers),
];

/// Run all passes over the IR, returning the rewritten value.
pub fn optimize(mut ir: Ir) -> Result<Ir, OptimizationError> {
    for (pass, run) in PASSES {
        for action in ir.init_actions.iter_mut().chain(ir.actions.iter_mut()) {
            run_pass(pass, *run, &mut action.start_operations, action.location)?;
            run_pass(pass, *run, &mut action.end_operations, action.location)?;
        }
        for timeline in &mut ir.timelines {
            for event in &mut timeline.events {
                run_pass(pass, *run, &mut event.start_operations, timeline.location)?;
                run_pass(pass, *run, &mut event.end_operations, timeline.location)?;
            }
        }
    }
    Ok(ir)
}

fn run_pass(
    pass: &str,
    run: PassFn,
    operations: &mut Vec<OperationInvocation>,
    location: Location,
) -> Result<(), OptimizationError> {
    run(operations).map_err(|message| OptimizationError {
        pass: pass.to_string(),
        message,
        location,
    })
}

/// Fold `when` markers whose expression is a boolean literal: `true` keeps
/// the then-branch unconditionally, `false` keeps the else-branch (or
/// nothing).
fn dead_branches(operations: &mut Vec<OperationInvocation>) -> Result<(), String> {
    loop {
        let Some((index, taken)) = operations.iter().enumerate().find_map(|(i, op)| {
            if op.system_name != markers::WHEN {
                return None;
            }
            match op.operation_data.get("expression") {
                Some(Value::Bool(b)) => Some((i, *b)),
                _ => None,
            }
        }) else {
            return Ok(());
        };

        let branches = find_branches(operations, index)?;
        let mut rewritten = Vec::with_capacity(operations.len());
        rewritten.extend_from_slice(&operations[..index]);
        if taken {
            let then_end = branches.otherwise.unwrap_or(branches.end);
            rewritten.extend_from_slice(&operations[index + 1..then_end]);
        } else if let Some(otherwise) = branches.otherwise {
            rewritten.extend_from_slice(&operations[otherwise + 1..branches.end]);
        }
        rewritten.extend_from_slice(&operations[branches.end + 1..]);
        *operations = rewritten;
    }
}

struct Branches {
    /// Index of the top-level `otherwise` marker, if any.
    otherwise: Option<usize>,
    /// Index of the matching `endWhen`.
    end: usize,
}

fn find_branches(operations: &[OperationInvocation], when: usize) -> Result<Branches, String> {
    let mut depth = 0usize;
    let mut otherwise = None;
    for (offset, op) in operations[when + 1..].iter().enumerate() {
        let index = when + 1 + offset;
        match op.system_name.as_str() {
            markers::WHEN => depth += 1,
            markers::OTHERWISE if depth == 0 => otherwise = Some(index),
            markers::END_WHEN => {
                if depth == 0 {
                    return Ok(Branches { otherwise, end: index });
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    Err("'when' marker without a matching 'endWhen'".into())
}

/// Remove marker pairs that enclose nothing. Repeats to a fixpoint so
/// nested empty blocks collapse completely.
fn empty_markers(operations: &mut Vec<OperationInvocation>) -> Result<(), String> {
    loop {
        let before = operations.len();
        let mut index = 0;
        while index + 1 < operations.len() {
            let pair = (
                operations[index].system_name.as_str(),
                operations[index + 1].system_name.as_str(),
            );
            match pair {
                (markers::WHEN, markers::END_WHEN)
                | (markers::FOR_EACH, markers::END_FOR_EACH) => {
                    operations.drain(index..=index + 1);
                    index = index.saturating_sub(1);
                }
                // an empty else-branch contributes nothing
                (markers::OTHERWISE, markers::END_WHEN) => {
                    operations.remove(index);
                    index = index.saturating_sub(1);
                }
                _ => index += 1,
            }
        }
        if operations.len() == before {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_ast::Location;
    use serde_json::Map;

    fn op(name: &str) -> OperationInvocation {
        OperationInvocation::bare(name, Location::default())
    }

    fn when_with(expression: Value) -> OperationInvocation {
        let mut data = Map::new();
        data.insert("expression".into(), expression);
        OperationInvocation {
            system_name: markers::WHEN.into(),
            operation_data: data,
            location: Location::default(),
        }
    }

    fn names(operations: &[OperationInvocation]) -> Vec<&str> {
        operations.iter().map(|op| op.system_name.as_str()).collect()
    }

    fn ir_with_event(operations: Vec<OperationInvocation>) -> Ir {
        Ir {
            container_selector: "#app".into(),
            location: Location::default(),
            layout_template: None,
            styles: None,
            media: vec![],
            init_actions: vec![],
            actions: vec![],
            timelines: vec![cue_ir::TimelineIr {
                name: "main".into(),
                provider: cue_ast::ProviderKind::RequestAnimationFrame,
                uri: None,
                events: vec![cue_ir::EventIr {
                    time: cue_ir::TimeSpec::Timed {
                        start: 0.0,
                        end: None,
                    },
                    start_operations: operations,
                    end_operations: vec![],
                }],
                location: Location::default(),
            }],
        }
    }

    #[test]
    fn test_constant_true_keeps_then_branch() {
        let mut ops = vec![
            when_with(Value::Bool(true)),
            op("wait"),
            op(markers::OTHERWISE),
            op("log"),
            op(markers::END_WHEN),
        ];
        dead_branches(&mut ops).unwrap();
        assert_eq!(names(&ops), ["wait"]);
    }

    #[test]
    fn test_constant_false_keeps_else_branch() {
        let mut ops = vec![
            when_with(Value::Bool(false)),
            op("wait"),
            op(markers::OTHERWISE),
            op("log"),
            op(markers::END_WHEN),
        ];
        dead_branches(&mut ops).unwrap();
        assert_eq!(names(&ops), ["log"]);
    }

    #[test]
    fn test_constant_false_without_else_removes_everything() {
        let mut ops = vec![
            when_with(Value::Bool(false)),
            op("wait"),
            op(markers::END_WHEN),
            op("log"),
        ];
        dead_branches(&mut ops).unwrap();
        assert_eq!(names(&ops), ["log"]);
    }

    #[test]
    fn test_dynamic_conditions_are_untouched() {
        let mut ops = vec![
            when_with(Value::String("scope.flag".into())),
            op("wait"),
            op(markers::END_WHEN),
        ];
        dead_branches(&mut ops).unwrap();
        assert_eq!(names(&ops), ["when", "wait", "endWhen"]);
    }

    #[test]
    fn test_nested_constant_branches_fold_completely() {
        let mut ops = vec![
            when_with(Value::Bool(true)),
            when_with(Value::Bool(false)),
            op("wait"),
            op(markers::END_WHEN),
            op("log"),
            op(markers::END_WHEN),
        ];
        dead_branches(&mut ops).unwrap();
        assert_eq!(names(&ops), ["log"]);
    }

    #[test]
    fn test_unbalanced_when_is_a_pass_error() {
        let mut ops = vec![when_with(Value::Bool(true)), op("wait")];
        assert!(dead_branches(&mut ops).is_err());
    }

    #[test]
    fn test_empty_marker_pairs_are_removed() {
        let mut ops = vec![
            op(markers::FOR_EACH),
            op(markers::END_FOR_EACH),
            op("wait"),
            op(markers::WHEN),
            op(markers::OTHERWISE),
            op(markers::END_WHEN),
        ];
        empty_markers(&mut ops).unwrap();
        assert_eq!(names(&ops), ["wait"]);
    }

    #[test]
    fn test_optimizer_is_idempotent() {
        let ir = ir_with_event(vec![
            when_with(Value::Bool(true)),
            op("wait"),
            op(markers::END_WHEN),
            op(markers::FOR_EACH),
            op(markers::END_FOR_EACH),
        ]);
        let once = optimize(ir).unwrap();
        let twice = optimize(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_pass_error_names_the_pass() {
        let ir = ir_with_event(vec![when_with(Value::Bool(true))]);
        let err = optimize(ir).unwrap_err();
        assert_eq!(err.pass, "dead-branches");
    }
}
