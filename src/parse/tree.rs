//! Builds a [`Node`](crate::node::Node) tree out of scanned tokens.
//!
//! The builder keeps a queue of tokens whose meaning is not decided yet.
//! Seeing an operator or a `{` decides what the queued tokens were: the last
//! one becomes a label, and anything before it is flushed out as a plain
//! list. A group node is always allocated before its children, so a group's
//! id is adjacent to the node that precedes it in the script.

use crate::node::{NodeArena, NodeId, NodePayload};
use crate::parse::{ParseError, Scanner};
use crate::report::{warn, ErrorKey};
use crate::token::Eq::{Question, Single};
use crate::token::{Comparator, Loc, Token, TokenKind};

/// Turn loose tokens into a group of anonymous single-value nodes, wrapped in
/// an anonymous group node. This is how `{ 10 20 30 }` lists end up.
fn flush_list(arena: &mut NodeArena, tokens: Vec<Token>) -> NodeId {
    let id = arena.alloc(None, None, NodePayload::Group(Vec::new()));
    let children: Vec<NodeId> =
        tokens.into_iter().map(|t| arena.alloc(None, None, NodePayload::Value(t))).collect();
    arena.set_children(id, children);
    id
}

fn last_is_operator(queue: &[Token]) -> bool {
    queue.last().is_some_and(|t| t.comparator().is_some())
}

/// Parse one brace-delimited group, or the whole file when `open` is `None`.
/// `open` is the location of the `{` that started this group.
pub(crate) fn build_group(
    scanner: &mut Scanner,
    arena: &mut NodeArena,
    open: Option<&Loc>,
) -> Result<Vec<NodeId>, ParseError> {
    let mut nodes: Vec<NodeId> = Vec::new();
    let mut queue: Vec<Token> = Vec::new();

    while let Some(token) = scanner.next() {
        let token = token?;
        match token.kind() {
            TokenKind::Comparator(_) => {
                if queue.is_empty() {
                    return Err(ParseError::UnexpectedOperator { token });
                }
                // Everything before the label was a plain list after all.
                if queue.len() > 1 {
                    let spill: Vec<Token> = queue.drain(..queue.len() - 1).collect();
                    nodes.push(flush_list(arena, spill));
                }
                queue.push(token);
            }
            TokenKind::BlockStart => {
                if let Some(op) = queue.last() {
                    if let Some(cmp) = op.comparator() {
                        if !matches!(cmp, Comparator::Equals(Single | Question)) {
                            return Err(ParseError::BadBlockOperator {
                                operator: op.clone(),
                                loc: token.loc,
                            });
                        }
                    }
                }
                let (label, operator) = if last_is_operator(&queue) {
                    let operator = queue.pop();
                    (queue.pop(), operator)
                } else if let Some(label) = queue.pop() {
                    // `key { ... }` reads as `key = { ... }`
                    let eq = Token::new(
                        "=".to_string(),
                        TokenKind::Comparator(Comparator::Equals(Single)),
                        label.loc.clone(),
                    );
                    (Some(label), Some(eq))
                } else {
                    (None, None)
                };
                let id = arena.alloc(label, operator, NodePayload::Group(Vec::new()));
                let children = build_group(scanner, arena, Some(&token.loc))?;
                arena.set_children(id, children);
                nodes.push(id);
            }
            TokenKind::BlockEnd => {
                if open.is_none() {
                    return Err(ParseError::StrayBlockEnd { loc: token.loc });
                }
                if !queue.is_empty() {
                    let spill = std::mem::take(&mut queue);
                    nodes.push(flush_list(arena, spill));
                }
                return Ok(nodes);
            }
            _ => {
                if last_is_operator(&queue) {
                    let operator = queue.pop();
                    let label = queue.pop();
                    nodes.push(arena.alloc(label, operator, NodePayload::Value(token)));
                } else {
                    queue.push(token);
                }
            }
        }
    }

    if let Some(first) = queue.first() {
        let pending = queue.iter().map(Token::as_str).collect::<Vec<_>>().join(" ");
        return Err(ParseError::QueueNotEmpty { pending, loc: first.loc.clone() });
    }
    if let Some(brace) = open {
        warn(ErrorKey::ParseError).msg("opening { was never closed").loc(brace).push();
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;
    use crate::parse::parse_script;

    fn parse(text: &str) -> (NodeArena, Vec<NodeId>) {
        let mut arena = NodeArena::new();
        let roots = parse_script(text, "test", &mut arena).unwrap();
        (arena, roots)
    }

    fn parse_err(text: &str) -> ParseError {
        let mut arena = NodeArena::new();
        parse_script(text, "test", &mut arena).unwrap_err()
    }

    fn describe_all(arena: &NodeArena, roots: &[NodeId]) -> String {
        roots.iter().map(|&id| arena.describe(id)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn simple_assignment() {
        let (arena, roots) = parse("A=B");
        assert_eq!(roots.len(), 1);
        assert_eq!(describe_all(&arena, &roots), "A = B");
    }

    #[test]
    fn leftover_tokens_are_an_error() {
        assert!(matches!(parse_err("A"), ParseError::QueueNotEmpty { .. }));
        assert!(matches!(parse_err("A="), ParseError::QueueNotEmpty { .. }));
        if let ParseError::QueueNotEmpty { pending, loc } = parse_err("x = y stray bits") {
            assert_eq!(pending, "stray bits");
            assert_eq!(loc.column, 7);
        } else {
            panic!("expected queued tokens to be reported");
        }
    }

    #[test]
    fn operator_without_a_key_is_an_error() {
        assert!(matches!(parse_err("= b"), ParseError::UnexpectedOperator { .. }));
        assert!(matches!(parse_err("a = { = b }"), ParseError::UnexpectedOperator { .. }));
    }

    #[test]
    fn stray_close_brace_is_an_error() {
        assert!(matches!(parse_err("}"), ParseError::StrayBlockEnd { .. }));
        assert!(matches!(parse_err("a = b }"), ParseError::StrayBlockEnd { .. }));
    }

    #[test]
    fn only_assignment_operators_can_open_blocks() {
        assert!(matches!(parse_err("a > { 1 2 }"), ParseError::BadBlockOperator { .. }));
        assert!(matches!(parse_err("a == { 1 2 }"), ParseError::BadBlockOperator { .. }));
        let (arena, roots) = parse("a ?= { b = c }");
        assert_eq!(describe_all(&arena, &roots), "a ?= { b = c }");
    }

    #[test]
    fn implicit_equals_before_block() {
        let (arena, roots) = parse("color {267 165 123}");
        assert_eq!(describe_all(&arena, &roots), "color = { { 267 165 123 } }");

        // explicit and implicit forms produce equivalent trees
        let (other, other_roots) = parse("color = {267 165 123}");
        assert!(arena.equivalent(roots[0], &other, other_roots[0]));
    }

    #[test]
    fn hsv_color_splits_into_two_nodes() {
        let (arena, roots) = parse("color = hsv {268 123 789}");
        assert_eq!(roots.len(), 2);
        assert_eq!(describe_all(&arena, &roots), "color = hsv\n{ { 268 123 789 } }");

        // the anonymous group gets the id right after the hsv node, so a
        // consumer can step from one to the other
        assert_eq!(arena.following(roots[0]), Some(roots[1]));
    }

    #[test]
    fn nested_groups() {
        let (arena, roots) = parse("a = { b = { c = d } e = f }");
        assert_eq!(describe_all(&arena, &roots), "a = { b = { c = d } e = f }");
    }

    #[test]
    fn group_ids_follow_their_parents() {
        let (arena, roots) = parse("before = 1 outer = { inner = { } } after = 2");
        let outer = roots[1];
        let inner = arena.following(outer).unwrap();
        assert!(arena[outer].children().unwrap().contains(&inner));
    }

    #[test]
    fn list_tokens_inside_assignments_spill_out() {
        // `10 20` before the `k =` are collected into an anonymous list
        let (arena, roots) = parse("a = { 10 20 k = v }");
        let children = arena[roots[0]].children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(arena.describe(children[0]), "{ 10 20 }");
        assert_eq!(arena.describe(children[1]), "k = v");
    }

    #[test]
    fn values_at_end_of_group_become_a_list() {
        let (arena, roots) = parse("a = { yes no 3 }");
        let children = arena[roots[0]].children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(arena.describe(children[0]), "{ yes no 3 }");
    }

    #[test]
    fn unclosed_brace_parses_with_a_warning() {
        // the missing } is tolerated; a report is filed instead
        let (arena, roots) = parse("a = { b = c ");
        assert_eq!(describe_all(&arena, &roots), "a = { b = c }");
    }

    #[test]
    fn empty_group() {
        let (arena, roots) = parse("a = {}");
        assert_eq!(describe_all(&arena, &roots), "a = { }");
    }
}
