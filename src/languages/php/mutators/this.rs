use tree_sitter::Node;

use crate::core::engine::context::MutationContext;
use crate::core::engine::traits::{Mutator, MutatorCategory};
use crate::languages::php::scope::{null_return_allowed, returned_expression};
use crate::languages::php::syntax::nodes;
use crate::types::PartialMutant;

const THIS: &str = "$this";

/// `return $this;` becomes `return null;` in functions that may return null
pub struct This;

fn returned_this<'tree>(node: &Node<'tree>, ctx: &MutationContext) -> Option<Node<'tree>> {
    if node.kind() != nodes::RETURN_STATEMENT {
        return None;
    }
    returned_expression(node)
        .filter(|expr| expr.kind() == nodes::VARIABLE_NAME && ctx.text(expr) == THIS)
}

impl Mutator for This {
    fn name(&self) -> &'static str {
        "This"
    }

    fn description(&self) -> &'static str {
        "Replaces a returned $this with null"
    }

    fn category(&self) -> MutatorCategory {
        MutatorCategory::ReturnValue
    }

    fn applies(&self, node: &Node, ctx: &MutationContext) -> bool {
        returned_this(node, ctx).is_some() && null_return_allowed(node, ctx) == Some(true)
    }

    fn mutate(&self, node: &Node, ctx: &MutationContext) -> Option<PartialMutant> {
        let this = returned_this(node, ctx)?;
        Some(ctx.replace_node(&this, "null"))
    }
}
