//! Whole-IR consistency checks that no single node can decide on its own.
//!
//! Runs after transformation: timeline provider/source pairing, container
//! selector syntax, and cross-action shape rules. Consumes one IR value
//! and returns it unchanged on success; no shared mutable IR between
//! stages.

use cue_ast::ProviderKind;
use cue_ir::Ir;

use crate::error::TypeCheckError;

/// Validate the IR; first violation wins.
pub fn check(ir: Ir) -> Result<Ir, TypeCheckError> {
    if let Some(reason) = validate_selector(&ir.container_selector) {
        return Err(TypeCheckError {
            expected: "a valid CSS selector".into(),
            actual: format!("'{}' ({reason})", ir.container_selector),
            location: ir.location,
            hint: Some("e.g. #app, .stage, or main > .viewport".into()),
        });
    }

    for timeline in &ir.timelines {
        let has_source = timeline.uri.as_deref().is_some_and(|uri| !uri.trim().is_empty());
        match timeline.provider {
            ProviderKind::Video | ProviderKind::Audio => {
                if !has_source {
                    return Err(TypeCheckError {
                        expected: format!(
                            "a media source for {} timeline '{}'",
                            timeline.provider.as_str(),
                            timeline.name
                        ),
                        actual: "no source".into(),
                        location: timeline.location,
                        hint: Some("give the timeline a media uri to play".into()),
                    });
                }
            }
            ProviderKind::RequestAnimationFrame | ProviderKind::Custom => {
                if timeline.uri.is_some() {
                    return Err(TypeCheckError {
                        expected: format!(
                            "no media source for {} timeline '{}'",
                            timeline.provider.as_str(),
                            timeline.name
                        ),
                        actual: format!("source '{}'", timeline.uri.as_deref().unwrap_or_default()),
                        location: timeline.location,
                        hint: Some(
                            "only video and audio timelines are driven by a media source".into(),
                        ),
                    });
                }
            }
        }
    }

    for action in &ir.actions {
        if action.endable && action.end_operations.is_empty() {
            return Err(TypeCheckError {
                expected: format!(
                    "at least one end operation in endable action '{}'",
                    action.name
                ),
                actual: "an empty end sequence".into(),
                location: action.location,
                hint: Some("make the action regular if it has nothing to undo".into()),
            });
        }
    }

    Ok(ir)
}

/// Syntactic CSS selector check. Deliberately a small grammar walk: simple
/// selectors (`tag`, `#id`, `.class`, `[attr]`, `:pseudo`, `*`), the
/// combinators `>`, `+`, `~`, descendant whitespace, and comma-separated
/// selector lists. Returns a reason when invalid.
pub fn validate_selector(selector: &str) -> Option<&'static str> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return Some("selector is empty");
    }

    for part in trimmed.split(',') {
        let part = part.trim();
        if part.is_empty() {
            return Some("empty selector in list");
        }
        let mut previous_was_combinator = true; // a leading combinator is invalid
        for token in part.split_whitespace() {
            match token {
                ">" | "+" | "~" => {
                    if previous_was_combinator {
                        return Some("combinator without a preceding selector");
                    }
                    previous_was_combinator = true;
                }
                _ => {
                    if let Some(reason) = validate_compound(token) {
                        return Some(reason);
                    }
                    previous_was_combinator = false;
                }
            }
        }
        if previous_was_combinator {
            return Some("selector ends with a combinator");
        }
    }
    None
}

/// One compound selector: `tag#id.class[attr=value]:pseudo` with no
/// whitespace.
fn validate_compound(token: &str) -> Option<&'static str> {
    let mut chars = token.chars().peekable();
    let mut saw_simple = false;

    while let Some(c) = chars.next() {
        match c {
            '*' => saw_simple = true,
            '#' | '.' => {
                let mut len = 0;
                while chars
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                {
                    chars.next();
                    len += 1;
                }
                if len == 0 {
                    return Some("'#' or '.' with no name");
                }
                saw_simple = true;
            }
            ':' => {
                // allow '::' element pseudos
                if chars.peek() == Some(&':') {
                    chars.next();
                }
                let mut len = 0;
                while chars
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || *c == '-')
                {
                    chars.next();
                    len += 1;
                }
                if len == 0 {
                    return Some("':' with no pseudo name");
                }
                // optional functional argument, e.g. :nth-child(2n+1)
                if chars.peek() == Some(&'(') {
                    chars.next();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == ')' {
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return Some("unclosed '(' in pseudo selector");
                    }
                }
                saw_simple = true;
            }
            '[' => {
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == ']' {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Some("unclosed '[' in attribute selector");
                }
                saw_simple = true;
            }
            c if c.is_ascii_alphabetic() || c == '-' || c == '_' => {
                while chars
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                {
                    chars.next();
                }
                saw_simple = true;
            }
            _ => return Some("unexpected character in selector"),
        }
    }

    if saw_simple {
        None
    } else {
        Some("selector has no simple selector")
    }
}
