use tree_sitter::Node;

use super::operator_token;
use crate::core::engine::context::MutationContext;
use crate::core::engine::traits::{Mutator, MutatorCategory};
use crate::languages::php::syntax::{nodes, tokens};
use crate::types::PartialMutant;

/// `$a ??= $b` becomes `$a = $b`, observable only when `$a` was already set.
///
/// Only the assignment form is targeted; `$a ?? $b` used as a value is left alone.
pub struct AssignCoalesce;

impl Mutator for AssignCoalesce {
    fn name(&self) -> &'static str {
        "AssignCoalesce"
    }

    fn description(&self) -> &'static str {
        "Replaces the null coalescing assignment operator (??=) with a plain assignment (=)"
    }

    fn category(&self) -> MutatorCategory {
        MutatorCategory::Operator
    }

    fn applies(&self, node: &Node, _ctx: &MutationContext) -> bool {
        node.kind() == nodes::AUGMENTED_ASSIGNMENT_EXPRESSION
            && operator_token(node, tokens::ASSIGN_COALESCE).is_some()
    }

    fn mutate(&self, node: &Node, ctx: &MutationContext) -> Option<PartialMutant> {
        let operator = operator_token(node, tokens::ASSIGN_COALESCE)?;
        Some(ctx.replace_node(&operator, tokens::ASSIGN))
    }
}
