//! Facts about the function a node belongs to, derived from the syntax tree.

use tree_sitter::Node;

use super::syntax::{fields, nodes};
use crate::core::engine::context::MutationContext;
use crate::utils::{ancestors, children};

/// The nearest function, method, closure or arrow function containing `node`.
///
/// A `return` inside a closure belongs to the closure, never to the function
/// the closure is defined in.
pub fn enclosing_function<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    ancestors(node).find(|n| nodes::FUNCTION_LIKE.contains(&n.kind()))
}

/// The declared return type node of a function-like node, if any
pub fn declared_return_type<'tree>(function: &Node<'tree>) -> Option<Node<'tree>> {
    if let Some(return_type) = function.child_by_field_name(fields::RETURN_TYPE) {
        return Some(return_type);
    }
    children(function)
        .into_iter()
        .skip_while(|child| child.kind() != nodes::FORMAL_PARAMETERS)
        .skip(1)
        .find(|child| child.kind().ends_with("_type"))
}

/// Whether a declared type accepts null: `?T`, a union with `null`, `null` or `mixed`
pub fn type_allows_null(type_text: &str) -> bool {
    let text = type_text.trim();
    if text.starts_with('?') {
        return true;
    }
    text.split('|')
        .map(|part| part.trim().trim_start_matches('(').trim_end_matches(')').trim())
        .any(|part| part.eq_ignore_ascii_case("null") || part.eq_ignore_ascii_case("mixed"))
}

/// Whether the function owning `node` may return null.
///
/// A missing return type counts as nullable. Returns None when `node` is not
/// inside any function, which callers treat as "cannot tell".
pub fn null_return_allowed(node: &Node, ctx: &MutationContext) -> Option<bool> {
    let function = enclosing_function(node)?;
    Some(match declared_return_type(&function) {
        Some(return_type) => type_allows_null(ctx.text(&return_type)),
        None => true,
    })
}

/// The expression a `return` statement hands back, if any, with any
/// enclosing parentheses stripped
pub fn returned_expression<'tree>(return_statement: &Node<'tree>) -> Option<Node<'tree>> {
    first_expression(return_statement).map(unparenthesized)
}

fn first_expression<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|child| child.kind() != nodes::COMMENT)
}

/// `((expr))` -> `expr`
fn unparenthesized(mut expr: Node<'_>) -> Node<'_> {
    while expr.kind() == nodes::PARENTHESIZED_EXPRESSION {
        match first_expression(&expr) {
            Some(inner) => expr = inner,
            None => break,
        }
    }
    expr
}
