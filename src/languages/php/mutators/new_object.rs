use tree_sitter::Node;

use crate::core::engine::context::MutationContext;
use crate::core::engine::traits::{Mutator, MutatorCategory};
use crate::languages::php::scope::{null_return_allowed, returned_expression};
use crate::languages::php::syntax::{nodes, tokens};
use crate::types::PartialMutant;
use crate::utils::{child_of_kind, children};

/// `return new Foo(...);` becomes `new Foo(...); return null;`.
///
/// The construction still runs for its side effects. Applies only when the
/// enclosing function may return null, the class is named literally, and the
/// class is not anonymous.
pub struct NewObject;

impl NewObject {
    fn constructed_object<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
        if node.kind() != nodes::RETURN_STATEMENT {
            return None;
        }
        returned_expression(node).filter(|expr| expr.kind() == nodes::OBJECT_CREATION_EXPRESSION)
    }
}

fn is_anonymous_class(creation: &Node) -> bool {
    child_of_kind(
        creation,
        &[nodes::ANONYMOUS_CLASS, nodes::DECLARATION_LIST, tokens::CLASS],
    )
    .is_some()
}

/// `new Foo`, `new \Foo\Bar`, `new static`; not `new $className` or `new ($expr)`
fn has_literal_class_name(creation: &Node) -> bool {
    children(creation)
        .into_iter()
        .find(|child| {
            child.is_named()
                && child.kind() != nodes::ARGUMENTS
                && child.kind() != nodes::COMMENT
                && child.kind() != nodes::ATTRIBUTE_LIST
        })
        .is_some_and(|designator| nodes::LITERAL_CLASS_NAMES.contains(&designator.kind()))
}

impl Mutator for NewObject {
    fn name(&self) -> &'static str {
        "NewObject"
    }

    fn description(&self) -> &'static str {
        "Replaces a returned object instantiation with null, keeping the instantiation"
    }

    fn category(&self) -> MutatorCategory {
        MutatorCategory::ReturnValue
    }

    fn applies(&self, node: &Node, ctx: &MutationContext) -> bool {
        let Some(creation) = Self::constructed_object(node) else {
            return false;
        };
        !is_anonymous_class(&creation)
            && has_literal_class_name(&creation)
            && null_return_allowed(node, ctx) == Some(true)
    }

    fn mutate(&self, node: &Node, ctx: &MutationContext) -> Option<PartialMutant> {
        let creation = Self::constructed_object(node)?;
        let separator = match ctx.indentation_of(node) {
            Some(indent) => format!("\n{indent}"),
            None => " ".to_string(),
        };
        let terminator = if ctx.text(node).trim_end().ends_with(';') {
            ";"
        } else {
            ""
        };
        Some(ctx.replace_node(
            node,
            format!(
                "{};{separator}return null{terminator}",
                ctx.text(&creation)
            ),
        ))
    }
}
