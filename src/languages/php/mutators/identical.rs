use tree_sitter::Node;

use super::operator_token;
use crate::core::engine::context::MutationContext;
use crate::core::engine::traits::{Mutator, MutatorCategory};
use crate::languages::php::syntax::{nodes, tokens};
use crate::types::PartialMutant;

fn swap_operator(
    node: &Node,
    ctx: &MutationContext,
    from: &str,
    to: &str,
) -> Option<PartialMutant> {
    if node.kind() != nodes::BINARY_EXPRESSION {
        return None;
    }
    let operator = operator_token(node, from)?;
    Some(ctx.replace_node(&operator, to))
}

pub struct Identical;

impl Mutator for Identical {
    fn name(&self) -> &'static str {
        "Identical"
    }

    fn description(&self) -> &'static str {
        "Replaces the identity operator (===) with the non-identity operator (!==)"
    }

    fn category(&self) -> MutatorCategory {
        MutatorCategory::Operator
    }

    fn applies(&self, node: &Node, _ctx: &MutationContext) -> bool {
        node.kind() == nodes::BINARY_EXPRESSION
            && operator_token(node, tokens::IDENTICAL).is_some()
    }

    fn mutate(&self, node: &Node, ctx: &MutationContext) -> Option<PartialMutant> {
        swap_operator(node, ctx, tokens::IDENTICAL, tokens::NOT_IDENTICAL)
    }
}

pub struct NotIdentical;

impl Mutator for NotIdentical {
    fn name(&self) -> &'static str {
        "NotIdentical"
    }

    fn description(&self) -> &'static str {
        "Replaces the non-identity operator (!==) with the identity operator (===)"
    }

    fn category(&self) -> MutatorCategory {
        MutatorCategory::Operator
    }

    fn applies(&self, node: &Node, _ctx: &MutationContext) -> bool {
        node.kind() == nodes::BINARY_EXPRESSION
            && operator_token(node, tokens::NOT_IDENTICAL).is_some()
    }

    fn mutate(&self, node: &Node, ctx: &MutationContext) -> Option<PartialMutant> {
        swap_operator(node, ctx, tokens::NOT_IDENTICAL, tokens::IDENTICAL)
    }
}
