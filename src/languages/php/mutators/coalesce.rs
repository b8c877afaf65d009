use tree_sitter::Node;

use super::operator_token;
use crate::core::engine::context::MutationContext;
use crate::core::engine::traits::{Mutator, MutatorCategory};
use crate::languages::php::syntax::{fields, nodes, tokens};
use crate::types::PartialMutant;

/// `$a ?? $b` becomes `$b ?? $a`
pub struct Coalesce;

impl Coalesce {
    fn operands<'tree>(node: &Node<'tree>) -> Option<(Node<'tree>, Node<'tree>)> {
        if node.kind() != nodes::BINARY_EXPRESSION {
            return None;
        }
        operator_token(node, tokens::COALESCE)?;
        let left = node.child_by_field_name(fields::LEFT)?;
        let right = node.child_by_field_name(fields::RIGHT)?;
        Some((left, right))
    }
}

impl Mutator for Coalesce {
    fn name(&self) -> &'static str {
        "Coalesce"
    }

    fn description(&self) -> &'static str {
        "Swaps the operands of the null coalescing operator (??)"
    }

    fn category(&self) -> MutatorCategory {
        MutatorCategory::Operator
    }

    fn applies(&self, node: &Node, ctx: &MutationContext) -> bool {
        let Some((left, right)) = Self::operands(node) else {
            return false;
        };
        let (left, right) = (ctx.text(&left), ctx.text(&right));
        // `$a ?? null` swapped is `null ?? $a`, which behaves identically
        left != right && !right.trim().eq_ignore_ascii_case("null")
    }

    fn mutate(&self, node: &Node, ctx: &MutationContext) -> Option<PartialMutant> {
        let (left, right) = Self::operands(node)?;
        Some(ctx.replace_node(
            node,
            format!("{} ?? {}", ctx.text(&right), ctx.text(&left)),
        ))
    }
}
