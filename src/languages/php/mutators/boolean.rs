use tree_sitter::Node;

use crate::core::engine::context::MutationContext;
use crate::core::engine::traits::{Mutator, MutatorCategory};
use crate::languages::php::syntax::nodes;
use crate::types::PartialMutant;

// PHP boolean literals are case-insensitive
fn is_boolean_literal(node: &Node, ctx: &MutationContext, value: &str) -> bool {
    node.kind() == nodes::BOOLEAN && ctx.text(node).eq_ignore_ascii_case(value)
}

pub struct TrueValue;

impl Mutator for TrueValue {
    fn name(&self) -> &'static str {
        "TrueValue"
    }

    fn description(&self) -> &'static str {
        "Replaces the boolean literal true with false"
    }

    fn category(&self) -> MutatorCategory {
        MutatorCategory::Boolean
    }

    fn applies(&self, node: &Node, ctx: &MutationContext) -> bool {
        is_boolean_literal(node, ctx, "true")
    }

    fn mutate(&self, node: &Node, ctx: &MutationContext) -> Option<PartialMutant> {
        Some(ctx.replace_node(node, "false"))
    }
}

pub struct FalseValue;

impl Mutator for FalseValue {
    fn name(&self) -> &'static str {
        "FalseValue"
    }

    fn description(&self) -> &'static str {
        "Replaces the boolean literal false with true"
    }

    fn category(&self) -> MutatorCategory {
        MutatorCategory::Boolean
    }

    fn applies(&self, node: &Node, ctx: &MutationContext) -> bool {
        is_boolean_literal(node, ctx, "false")
    }

    fn mutate(&self, node: &Node, ctx: &MutationContext) -> Option<PartialMutant> {
        Some(ctx.replace_node(node, "true"))
    }
}
