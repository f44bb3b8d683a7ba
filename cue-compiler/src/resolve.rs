//! Name resolution for call sites.
//!
//! A [`NameRegistry`] is built once per compile from the program and its
//! linked libraries, then frozen: nothing mutates it afterwards. Resolution
//! order is fixed: user actions shadow built-in operations on a name
//! collision.

use cue_ast::{ActionDefinition, Library, Program};
use indexmap::IndexMap;

use crate::registry::{self, OperationSignature};
use crate::suggest;

/// Known names for one compile: user actions plus the static operation
/// table.
#[derive(Debug)]
pub struct NameRegistry<'a> {
    /// Action name → definition, first-seen order. The linker guarantees
    /// no duplicates before this is built.
    actions: IndexMap<&'a str, &'a ActionDefinition>,
}

/// Outcome of resolving one call-site identifier.
#[derive(Debug)]
pub enum ResolvedName<'a> {
    Action(&'a ActionDefinition),
    Operation(&'static OperationSignature),
    /// Neither an action nor an operation. Suggestions are computed against
    /// known action names only; ranking the full built-in set on every miss
    /// was judged not worth the cost, an accepted imprecision.
    Unresolved { suggestions: Vec<String> },
}

impl<'a> NameRegistry<'a> {
    /// Collect action names from the program and every linked library.
    /// Library actions are merged flatly; the built-in operation set comes
    /// from the static registry table.
    pub fn build(program: &'a Program, libraries: &'a [Library]) -> Self {
        let mut actions = IndexMap::new();
        for action in &program.actions {
            actions.insert(action.name.as_str(), action);
        }
        for library in libraries {
            for action in &library.actions {
                actions.insert(action.name.as_str(), action);
            }
        }
        Self { actions }
    }

    /// Look up a user action by name.
    pub fn action(&self, name: &str) -> Option<&'a ActionDefinition> {
        self.actions.get(name).copied()
    }

    /// All known action names, insertion order.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().copied()
    }

    /// Whether `name` is a built-in operation.
    pub fn is_operation(&self, name: &str) -> bool {
        registry::lookup(name).is_some()
    }

    /// Resolve a call-site identifier. Actions take priority over
    /// operations.
    pub fn resolve(&self, name: &str) -> ResolvedName<'a> {
        if let Some(action) = self.action(name) {
            return ResolvedName::Action(action);
        }
        if let Some(signature) = registry::lookup(name) {
            return ResolvedName::Operation(signature);
        }
        ResolvedName::Unresolved {
            suggestions: suggest::suggest(name, self.action_names()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_ast::{ActionBody, Location};

    fn action(name: &str) -> ActionDefinition {
        ActionDefinition {
            name: name.into(),
            parameters: vec![],
            body: ActionBody::Regular(vec![]),
            location: Location::default(),
        }
    }

    fn program(actions: Vec<ActionDefinition>) -> Program {
        Program {
            name: "demo".into(),
            container_selector: "#app".into(),
            imports: vec![],
            setup: vec![],
            actions,
            timelines: vec![],
            location: Location::default(),
        }
    }

    #[test]
    fn test_actions_shadow_operations() {
        let program = program(vec![action("wait")]);
        let registry = NameRegistry::build(&program, &[]);
        assert!(matches!(
            registry.resolve("wait"),
            ResolvedName::Action(def) if def.name == "wait"
        ));
    }

    #[test]
    fn test_operations_resolve_when_not_shadowed() {
        let program = program(vec![]);
        let registry = NameRegistry::build(&program, &[]);
        assert!(matches!(
            registry.resolve("selectElement"),
            ResolvedName::Operation(sig) if sig.system_name == "selectElement"
        ));
    }

    #[test]
    fn test_library_actions_are_merged() {
        let program = program(vec![]);
        let libraries = vec![Library {
            name: "fades".into(),
            actions: vec![action("fadeIn")],
            location: Location::default(),
        }];
        let registry = NameRegistry::build(&program, &libraries);
        assert!(registry.action("fadeIn").is_some());
    }

    #[test]
    fn test_unresolved_suggests_nearby_actions() {
        let program = program(vec![action("fadeIn"), action("fadeOut")]);
        let registry = NameRegistry::build(&program, &[]);
        match registry.resolve("fadeIm") {
            ResolvedName::Unresolved { suggestions } => {
                assert_eq!(suggestions[0], "fadeIn");
            }
            other => panic!("expected unresolved, got {other:?}"),
        }
    }

    #[test]
    fn test_typo_of_operation_name_gets_no_operation_suggestions() {
        // Accepted imprecision: operation names are not ranked.
        let program = program(vec![]);
        let registry = NameRegistry::build(&program, &[]);
        match registry.resolve("selectElemnt") {
            ResolvedName::Unresolved { suggestions } => assert!(suggestions.is_empty()),
            other => panic!("expected unresolved, got {other:?}"),
        }
    }
}
