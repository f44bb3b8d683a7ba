//! AST-to-IR transformation.
//!
//! Walks every setup block, action body, and timeline event, converting
//! call statements to operation invocations (resolve name → validate →
//! map parameters), lowering `if`/`for`/`break`/`continue` to the flat
//! control-flow-marker encoding, and inlining user actions at their call
//! sites; the target runtime has no call/return concept.
//!
//! All state here is request-scoped: the transformer, its inline stack,
//! and every output tracker live for one compile only.

use std::collections::HashMap;

use cue_ast::{
    ActionBody, ActionDefinition, CallStatement, Event, EventKind, Expr, Location, Program,
    Statement,
};
use cue_ir::{ActionIr, EventIr, Ir, OperationInvocation, TimeSpec, TimelineIr};
use serde_json::{Map, Value};

use crate::AssetLoadingResult;
use crate::error::{TransformError, ValidationError};
use crate::params;
use crate::registry::{self, markers};
use crate::resolve::{NameRegistry, ResolvedName};
use crate::suggest;
use crate::validate::{self, OutputTracker};

/// Lower a linked program into IR, splicing pre-resolved asset data in
/// opaquely. Fails on the first transformation error.
pub fn transform(
    program: &Program,
    names: &NameRegistry<'_>,
    assets: Option<&AssetLoadingResult>,
) -> Result<Ir, TransformError> {
    if program.container_selector.trim().is_empty() {
        return Err(TransformError::MissingContainer {
            location: program.location,
        });
    }

    let mut transformer = Transformer {
        names,
        inline_stack: Vec::new(),
    };

    let mut init_actions = Vec::new();
    if !program.setup.is_empty() {
        let sequences = transformer.compile_validated(&program.setup)?;
        init_actions.push(ActionIr {
            name: "setup".into(),
            endable: !sequences.end.is_empty(),
            start_operations: sequences.start,
            end_operations: sequences.end,
            location: program.location,
        });
    }

    let mut actions = Vec::new();
    for definition in &program.actions {
        actions.push(transformer.compile_action_definition(definition)?);
    }

    let mut timelines = Vec::new();
    for timeline in &program.timelines {
        if timeline.name.trim().is_empty() {
            return Err(TransformError::InvalidTimeline {
                name: timeline.name.clone(),
                reason: "timeline has no name".into(),
                location: timeline.location,
            });
        }

        let mut events = Vec::new();
        for event in &timeline.events {
            events.push(transformer.compile_event(event)?);
        }
        timelines.push(TimelineIr {
            name: timeline.name.clone(),
            provider: timeline.provider,
            uri: timeline.source.clone(),
            events,
            location: timeline.location,
        });
    }

    Ok(Ir {
        container_selector: program.container_selector.clone(),
        location: program.location,
        layout_template: assets.and_then(|a| a.layout_template.clone()),
        styles: assets.and_then(|a| a.styles.clone()),
        media: assets.map(|a| a.media.clone()).unwrap_or_default(),
        init_actions,
        actions,
        timelines,
    })
}

/// Bound action parameters during inlining: parameter name → lowered
/// call-site argument.
type Bindings = HashMap<String, Value>;

/// Start and end operation lists being built for one sequence. End
/// operations only come from endable actions called in the sequence.
#[derive(Default)]
struct Sequences {
    start: Vec<OperationInvocation>,
    end: Vec<OperationInvocation>,
}

struct Transformer<'a> {
    names: &'a NameRegistry<'a>,
    /// Actions currently being inlined, outermost first. A name recurring
    /// here means the expansion would never terminate.
    inline_stack: Vec<String>,
}

impl<'a> Transformer<'a> {
    /// Compile one event body: full validation, dependency checking
    /// included, since the event sequence is a complete execution context.
    fn compile_event(&mut self, event: &Event) -> Result<EventIr, TransformError> {
        let sequences = self.compile_validated(&event.body)?;
        Ok(EventIr {
            time: convert_time(&event.kind),
            start_operations: sequences.start,
            end_operations: sequences.end,
        })
    }

    /// Compile a standalone action definition for the config's `actions`
    /// array. Pairing is validated; dependency checking is skipped, since a
    /// definition may legitimately rely on state its caller sets up, and
    /// is re-validated in context wherever it is inlined.
    fn compile_action_definition(
        &mut self,
        definition: &ActionDefinition,
    ) -> Result<ActionIr, TransformError> {
        let bindings = Bindings::new();
        let mut sequences = Sequences::default();
        self.inline_stack.push(definition.name.clone());
        let result = self.compile_body(&definition.body, &bindings, &mut sequences);
        self.inline_stack.pop();
        result?;

        validate_sequence(&sequences.start, false)?;
        validate_sequence(&sequences.end, false)?;

        // A regular body can still pick up end operations by calling an
        // endable action; the emitted shape follows the content, not the
        // definition syntax alone.
        let endable =
            matches!(definition.body, ActionBody::Endable { .. }) || !sequences.end.is_empty();

        Ok(ActionIr {
            name: definition.name.clone(),
            endable,
            start_operations: sequences.start,
            end_operations: sequences.end,
            location: definition.location,
        })
    }

    /// Compile a statement list and run both validators over the result.
    fn compile_validated(
        &mut self,
        statements: &[Statement],
    ) -> Result<Sequences, TransformError> {
        let mut sequences = Sequences::default();
        self.compile_sequence(statements, &Bindings::new(), 0, &mut sequences)?;
        validate_sequence(&sequences.start, true)?;
        validate_sequence(&sequences.end, false)?;
        Ok(sequences)
    }

    fn compile_sequence(
        &mut self,
        statements: &[Statement],
        bindings: &Bindings,
        loop_depth: usize,
        out: &mut Sequences,
    ) -> Result<(), TransformError> {
        for statement in statements {
            match statement {
                Statement::Call(call) => self.compile_call(call, bindings, out)?,
                Statement::If(stmt) => {
                    let mut data = Map::new();
                    data.insert("expression".into(), lower_expr(&stmt.condition, bindings));
                    out.start.push(OperationInvocation {
                        system_name: markers::WHEN.into(),
                        operation_data: data,
                        location: stmt.location,
                    });
                    self.compile_sequence(&stmt.then_body, bindings, loop_depth, out)?;
                    if let Some(else_body) = &stmt.else_body {
                        out.start
                            .push(OperationInvocation::bare(markers::OTHERWISE, stmt.location));
                        self.compile_sequence(else_body, bindings, loop_depth, out)?;
                    }
                    out.start
                        .push(OperationInvocation::bare(markers::END_WHEN, stmt.location));
                }
                Statement::For(stmt) => {
                    let mut data = Map::new();
                    data.insert("collection".into(), lower_expr(&stmt.collection, bindings));
                    out.start.push(OperationInvocation {
                        system_name: markers::FOR_EACH.into(),
                        operation_data: data,
                        location: stmt.location,
                    });
                    self.compile_sequence(&stmt.body, bindings, loop_depth + 1, out)?;
                    out.start
                        .push(OperationInvocation::bare(markers::END_FOR_EACH, stmt.location));
                }
                Statement::Break { location } => {
                    if loop_depth == 0 {
                        return Err(TransformError::BreakOutsideLoop {
                            location: *location,
                        });
                    }
                    out.start
                        .push(OperationInvocation::bare(markers::BREAK, *location));
                }
                Statement::Continue { location } => {
                    if loop_depth == 0 {
                        return Err(TransformError::ContinueOutsideLoop {
                            location: *location,
                        });
                    }
                    out.start
                        .push(OperationInvocation::bare(markers::CONTINUE, *location));
                }
            }
        }
        Ok(())
    }

    fn compile_call(
        &mut self,
        call: &CallStatement,
        bindings: &Bindings,
        out: &mut Sequences,
    ) -> Result<(), TransformError> {
        match self.names.resolve(&call.name) {
            ResolvedName::Action(definition) => self.inline_action(definition, call, bindings, out),
            ResolvedName::Operation(signature) => {
                if let Some(error) =
                    validate::validate_parameter_count(signature, call.arguments.len(), call.location)
                {
                    return Err(error.into());
                }
                let arguments: Vec<Value> = call
                    .arguments
                    .iter()
                    .map(|argument| lower_expr(argument, bindings))
                    .collect();
                let data = match params::map_positional_to_named(signature, &arguments, call.location)
                {
                    Ok(data) => data,
                    Err(errors) => match errors.into_iter().next() {
                        Some(error) => return Err(error.into()),
                        // an empty error batch never happens; treat as success
                        None => Map::new(),
                    },
                };
                out.start.push(OperationInvocation {
                    system_name: signature.system_name.into(),
                    operation_data: data,
                    location: call.location,
                });
                Ok(())
            }
            ResolvedName::Unresolved { suggestions } => {
                let hint = suggest::did_you_mean(&suggestions);
                Err(ValidationError::UnknownName {
                    name: call.name.clone(),
                    suggestions,
                    hint,
                    location: call.location,
                }
                .into())
            }
        }
    }

    /// Substitute the callee's operation sequence at the call site, with
    /// its parameters bound to the call's (already lowered) arguments.
    fn inline_action(
        &mut self,
        definition: &ActionDefinition,
        call: &CallStatement,
        caller_bindings: &Bindings,
        out: &mut Sequences,
    ) -> Result<(), TransformError> {
        let expected = definition.parameters.len();
        if call.arguments.len() != expected {
            return Err(ValidationError::ParameterCount {
                operation: definition.name.clone(),
                min: expected,
                max: expected,
                actual: call.arguments.len(),
                hint: Some(format!(
                    "action signature: {}({})",
                    definition.name,
                    definition.parameters.join(", ")
                )),
                location: call.location,
            }
            .into());
        }

        if self.inline_stack.contains(&definition.name) {
            let mut chain = self.inline_stack.clone();
            chain.push(definition.name.clone());
            return Err(TransformError::RecursiveInlining {
                action: definition.name.clone(),
                chain: chain.join(" -> "),
                location: call.location,
            });
        }

        let bindings: Bindings = definition
            .parameters
            .iter()
            .zip(&call.arguments)
            .map(|(parameter, argument)| {
                (parameter.clone(), lower_expr(argument, caller_bindings))
            })
            .collect();

        self.inline_stack.push(definition.name.clone());
        let result = self.compile_body(&definition.body, &bindings, out);
        self.inline_stack.pop();
        result
    }

    fn compile_body(
        &mut self,
        body: &ActionBody,
        bindings: &Bindings,
        out: &mut Sequences,
    ) -> Result<(), TransformError> {
        match body {
            // Loop depth resets: a break in an action body must sit inside
            // the action's own for statement, not the caller's.
            ActionBody::Regular(statements) => {
                self.compile_sequence(statements, bindings, 0, out)
            }
            ActionBody::Endable { start, end } => {
                self.compile_sequence(start, bindings, 0, out)?;
                let mut end_sequences = Sequences::default();
                self.compile_sequence(end, bindings, 0, &mut end_sequences)?;
                out.end.extend(end_sequences.start);
                out.end.extend(end_sequences.end);
                Ok(())
            }
        }
    }
}

/// Pairing check always; dependency checking only for sequences that are a
/// complete execution context. The dependency walk never looks across
/// sibling branches: outputs produced inside a marker body are dropped
/// when the branch ends.
fn validate_sequence(
    operations: &[OperationInvocation],
    check_dependencies: bool,
) -> Result<(), TransformError> {
    let names: Vec<(&str, Location)> = operations
        .iter()
        .map(|op| (op.system_name.as_str(), op.location))
        .collect();
    if let Some(error) = validate::validate_control_flow_pairing(&names).into_iter().next() {
        return Err(error.into());
    }
    if !check_dependencies {
        return Ok(());
    }

    let mut tracker = OutputTracker::new();
    let mut snapshots: Vec<OutputTracker> = Vec::new();
    for operation in operations {
        // Invariant: the transformer only emits registry operations.
        let Some(signature) = registry::lookup(&operation.system_name) else {
            continue;
        };
        match operation.system_name.as_str() {
            markers::WHEN | markers::FOR_EACH => snapshots.push(tracker.clone()),
            markers::OTHERWISE => {
                if let Some(at_open) = snapshots.last() {
                    tracker = at_open.clone();
                }
            }
            markers::END_WHEN | markers::END_FOR_EACH => {
                if let Some(at_open) = snapshots.pop() {
                    tracker = at_open;
                }
            }
            _ => {}
        }
        if let Some(error) = validate::validate_dependencies(signature, &tracker, operation.location)
            .into_iter()
            .next()
        {
            return Err(error.into());
        }
        tracker.track(signature);
    }
    Ok(())
}

/// Lower an argument expression to a plain JSON value. Reference
/// expressions become literal dotted strings; bound action parameters are
/// substituted first.
fn lower_expr(expr: &Expr, bindings: &Bindings) -> Value {
    match expr {
        Expr::String(s) => Value::String(s.clone()),
        Expr::Number(n) => Value::from(*n),
        Expr::Boolean(b) => Value::Bool(*b),
        Expr::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| lower_expr(item, bindings))
                .collect(),
        ),
        Expr::Object(entries) => {
            let mut map = Map::new();
            for (key, value) in entries {
                map.insert(key.clone(), lower_expr(value, bindings));
            }
            Value::Object(map)
        }
        Expr::Reference(path) => match path.first().and_then(|head| bindings.get(head)) {
            Some(bound) if path.len() == 1 => bound.clone(),
            Some(bound) => {
                // Non-string bindings still prefix the dotted path; the
                // runtime resolves the rest of the chain at play time.
                let prefix = match bound {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Value::String(format!("{prefix}.{}", path[1..].join(".")))
            }
            None => Value::String(path.join(".")),
        },
    }
}

fn convert_time(kind: &EventKind) -> TimeSpec {
    match kind {
        EventKind::Timed { start, end } => TimeSpec::Timed {
            start: *start,
            end: *end,
        },
        EventKind::Sequence { duration } => TimeSpec::Sequence {
            duration: *duration,
        },
        EventKind::Stagger { interval, duration } => TimeSpec::Stagger {
            interval: *interval,
            duration: *duration,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_ast::{ForStatement, IfStatement, Library, ProviderKind, Timeline};
    use serde_json::json;

    fn loc() -> Location {
        Location::default()
    }

    fn call(name: &str, arguments: Vec<Expr>) -> Statement {
        Statement::Call(CallStatement {
            name: name.into(),
            arguments,
            location: loc(),
        })
    }

    fn empty_program() -> Program {
        Program {
            name: "demo".into(),
            container_selector: "#app".into(),
            imports: vec![],
            setup: vec![],
            actions: vec![],
            timelines: vec![],
            location: loc(),
        }
    }

    fn timeline(events: Vec<Event>) -> Timeline {
        Timeline {
            name: "main".into(),
            provider: ProviderKind::RequestAnimationFrame,
            source: None,
            events,
            location: loc(),
        }
    }

    fn timed_event(body: Vec<Statement>) -> Event {
        Event {
            kind: EventKind::Timed {
                start: 0.0,
                end: Some(1.0),
            },
            body,
            location: loc(),
        }
    }

    fn compile(program: &Program) -> Result<Ir, TransformError> {
        compile_with(program, &[])
    }

    fn compile_with(program: &Program, libraries: &[Library]) -> Result<Ir, TransformError> {
        let names = NameRegistry::build(program, libraries);
        transform(program, &names, None)
    }

    fn start_names(ir: &Ir) -> Vec<String> {
        ir.timelines[0].events[0]
            .start_operations
            .iter()
            .map(|op| op.system_name.clone())
            .collect()
    }

    #[test]
    fn test_zero_argument_operation_gets_empty_operation_data() {
        let mut program = empty_program();
        program.timelines.push(timeline(vec![timed_event(vec![
            call("selectElement", vec![Expr::string("#box")]),
            call("clearElement", vec![]),
        ])]));
        let ir = compile(&program).unwrap();
        let clear = &ir.timelines[0].events[0].start_operations[1];
        assert_eq!(clear.system_name, "clearElement");
        assert!(clear.operation_data.is_empty());
    }

    #[test]
    fn test_if_else_lowers_to_flat_markers() {
        let mut program = empty_program();
        program.timelines.push(timeline(vec![timed_event(vec![
            Statement::If(IfStatement {
                condition: Expr::reference(&["scope", "visible"]),
                then_body: vec![call("wait", vec![Expr::Number(10.0)])],
                else_body: Some(vec![call("log", vec![])]),
                location: loc(),
            }),
        ])]));
        let ir = compile(&program).unwrap();
        assert_eq!(
            start_names(&ir),
            ["when", "wait", "otherwise", "log", "endWhen"]
        );
        let when = &ir.timelines[0].events[0].start_operations[0];
        assert_eq!(when.operation_data.get("expression"), Some(&json!("scope.visible")));
    }

    #[test]
    fn test_for_lowers_to_for_each_markers_and_allows_break() {
        let mut program = empty_program();
        program.timelines.push(timeline(vec![timed_event(vec![
            Statement::For(ForStatement {
                collection: Expr::Array(vec![Expr::string("a"), Expr::string("b")]),
                body: vec![
                    call("log", vec![]),
                    Statement::Break { location: loc() },
                ],
                location: loc(),
            }),
        ])]));
        let ir = compile(&program).unwrap();
        assert_eq!(
            start_names(&ir),
            ["forEach", "log", "breakLoop", "endForEach"]
        );
    }

    #[test]
    fn test_break_outside_loop_is_an_error() {
        let mut program = empty_program();
        program
            .timelines
            .push(timeline(vec![timed_event(vec![Statement::Break {
                location: loc(),
            }])]));
        assert!(matches!(
            compile(&program),
            Err(TransformError::BreakOutsideLoop { .. })
        ));
    }

    #[test]
    fn test_action_call_is_inlined_with_bound_parameters() {
        let mut program = empty_program();
        program.actions.push(ActionDefinition {
            name: "highlight".into(),
            parameters: vec!["selector".into()],
            body: ActionBody::Regular(vec![
                call("selectElement", vec![Expr::reference(&["selector"])]),
                call("addClass", vec![Expr::string("active")]),
            ]),
            location: loc(),
        });
        program.timelines.push(timeline(vec![timed_event(vec![call(
            "highlight",
            vec![Expr::string("#title")],
        )])]));

        let ir = compile(&program).unwrap();
        assert_eq!(start_names(&ir), ["selectElement", "addClass"]);
        let select = &ir.timelines[0].events[0].start_operations[0];
        assert_eq!(select.operation_data.get("selector"), Some(&json!("#title")));
    }

    #[test]
    fn test_reference_with_non_string_bound_head_renders_the_binding() {
        let mut program = empty_program();
        program.actions.push(ActionDefinition {
            name: "nth".into(),
            parameters: vec!["item".into()],
            body: ActionBody::Regular(vec![call(
                "log",
                vec![Expr::Reference(vec!["item".into(), "label".into()])],
            )]),
            location: loc(),
        });
        program.timelines.push(timeline(vec![timed_event(vec![call(
            "nth",
            vec![Expr::Boolean(true)],
        )])]));

        let ir = compile(&program).unwrap();
        let log = &ir.timelines[0].events[0].start_operations[0];
        assert_eq!(log.operation_data.get("message"), Some(&json!("true.label")));
    }

    #[test]
    fn test_endable_action_splits_start_and_end_operations() {
        let mut program = empty_program();
        program.actions.push(ActionDefinition {
            name: "reveal".into(),
            parameters: vec![],
            body: ActionBody::Endable {
                start: vec![
                    call("selectElement", vec![Expr::string("#box")]),
                    call("addClass", vec![Expr::string("visible")]),
                ],
                end: vec![
                    call("selectElement", vec![Expr::string("#box")]),
                    call("removeClass", vec![Expr::string("visible")]),
                ],
            },
            location: loc(),
        });
        program
            .timelines
            .push(timeline(vec![timed_event(vec![call("reveal", vec![])])]));

        let ir = compile(&program).unwrap();
        let event = &ir.timelines[0].events[0];
        assert_eq!(event.start_operations.len(), 2);
        assert_eq!(event.end_operations.len(), 2);
        assert_eq!(event.end_operations[1].system_name, "removeClass");
    }

    #[test]
    fn test_regular_action_calling_endable_action_becomes_endable() {
        let mut program = empty_program();
        program.actions.push(ActionDefinition {
            name: "reveal".into(),
            parameters: vec![],
            body: ActionBody::Endable {
                start: vec![call("selectElement", vec![Expr::string("#box")])],
                end: vec![
                    call("selectElement", vec![Expr::string("#box")]),
                    call("removeClass", vec![Expr::string("visible")]),
                ],
            },
            location: loc(),
        });
        program.actions.push(ActionDefinition {
            name: "wrapper".into(),
            parameters: vec![],
            body: ActionBody::Regular(vec![call("reveal", vec![])]),
            location: loc(),
        });

        let ir = compile(&program).unwrap();
        let wrapper = ir.actions.iter().find(|a| a.name == "wrapper").unwrap();
        assert!(wrapper.endable);
        assert_eq!(wrapper.end_operations.len(), 2);
        assert_eq!(wrapper.end_operations[1].system_name, "removeClass");
    }

    #[test]
    fn test_recursive_inlining_is_detected() {
        let mut program = empty_program();
        program.actions.push(ActionDefinition {
            name: "ouroboros".into(),
            parameters: vec![],
            body: ActionBody::Regular(vec![call("ouroboros", vec![])]),
            location: loc(),
        });
        let err = compile(&program).unwrap_err();
        match err {
            TransformError::RecursiveInlining { action, chain, .. } => {
                assert_eq!(action, "ouroboros");
                assert_eq!(chain, "ouroboros -> ouroboros");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_mutually_recursive_actions_are_detected() {
        let mut program = empty_program();
        program.actions.push(ActionDefinition {
            name: "ping".into(),
            parameters: vec![],
            body: ActionBody::Regular(vec![call("pong", vec![])]),
            location: loc(),
        });
        program.actions.push(ActionDefinition {
            name: "pong".into(),
            parameters: vec![],
            body: ActionBody::Regular(vec![call("ping", vec![])]),
            location: loc(),
        });
        assert!(matches!(
            compile(&program),
            Err(TransformError::RecursiveInlining { .. })
        ));
    }

    #[test]
    fn test_unknown_name_carries_action_suggestions() {
        let mut program = empty_program();
        program.actions.push(ActionDefinition {
            name: "fadeIn".into(),
            parameters: vec![],
            body: ActionBody::Regular(vec![]),
            location: loc(),
        });
        program
            .timelines
            .push(timeline(vec![timed_event(vec![call("fadeIm", vec![])])]));
        let err = compile(&program).unwrap_err();
        match err {
            TransformError::Call(ValidationError::UnknownName { suggestions, .. }) => {
                assert_eq!(suggestions, vec!["fadeIn".to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_dependency_violation_in_event_sequence() {
        let mut program = empty_program();
        program.timelines.push(timeline(vec![timed_event(vec![call(
            "addClass",
            vec![Expr::string("active")],
        )])]));
        let err = compile(&program).unwrap_err();
        assert!(matches!(
            err,
            TransformError::Call(ValidationError::MissingDependency { .. })
        ));
    }

    #[test]
    fn test_branch_outputs_do_not_leak_to_siblings() {
        // selectElement inside the then-branch must not satisfy addClass
        // in the else-branch.
        let mut program = empty_program();
        program.timelines.push(timeline(vec![timed_event(vec![
            Statement::If(IfStatement {
                condition: Expr::reference(&["scope", "flag"]),
                then_body: vec![call("selectElement", vec![Expr::string("#a")])],
                else_body: Some(vec![call("addClass", vec![Expr::string("x")])]),
                location: loc(),
            }),
        ])]));
        assert!(matches!(
            compile(&program),
            Err(TransformError::Call(ValidationError::MissingDependency { .. }))
        ));
    }

    #[test]
    fn test_action_definitions_skip_dependency_checking() {
        // A definition may rely on caller-established selection.
        let mut program = empty_program();
        program.actions.push(ActionDefinition {
            name: "mark".into(),
            parameters: vec![],
            body: ActionBody::Regular(vec![call("addClass", vec![Expr::string("mark")])]),
            location: loc(),
        });
        let ir = compile(&program).unwrap();
        assert_eq!(ir.actions[0].start_operations[0].system_name, "addClass");
    }

    #[test]
    fn test_missing_container_selector() {
        let mut program = empty_program();
        program.container_selector = "  ".into();
        assert!(matches!(
            compile(&program),
            Err(TransformError::MissingContainer { .. })
        ));
    }

    #[test]
    fn test_setup_block_becomes_init_action() {
        let mut program = empty_program();
        program.setup = vec![call(
            "setGlobalData",
            vec![Expr::Object(vec![("lang".into(), Expr::string("en"))])],
        )];
        let ir = compile(&program).unwrap();
        assert_eq!(ir.init_actions.len(), 1);
        assert_eq!(ir.init_actions[0].name, "setup");
        assert_eq!(
            ir.init_actions[0].start_operations[0].system_name,
            "setGlobalData"
        );
    }

    #[test]
    fn test_assets_are_spliced_opaquely() {
        let program = empty_program();
        let names = NameRegistry::build(&program, &[]);
        let assets = AssetLoadingResult {
            layout_template: Some("<main></main>".into()),
            styles: Some("body{margin:0}".into()),
            media: vec!["intro.mp4".into()],
        };
        let ir = transform(&program, &names, Some(&assets)).unwrap();
        assert_eq!(ir.layout_template.as_deref(), Some("<main></main>"));
        assert_eq!(ir.styles.as_deref(), Some("body{margin:0}"));
        assert_eq!(ir.media, vec!["intro.mp4".to_string()]);
    }

    #[test]
    fn test_action_arity_is_exact() {
        let mut program = empty_program();
        program.actions.push(ActionDefinition {
            name: "highlight".into(),
            parameters: vec!["selector".into()],
            body: ActionBody::Regular(vec![]),
            location: loc(),
        });
        program
            .timelines
            .push(timeline(vec![timed_event(vec![call("highlight", vec![])])]));
        let err = compile(&program).unwrap_err();
        match err {
            TransformError::Call(ValidationError::ParameterCount { min, max, actual, .. }) => {
                assert_eq!((min, max, actual), (1, 1, 0));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
