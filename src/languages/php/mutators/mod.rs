mod assign_coalesce;
mod boolean;
mod coalesce;
mod identical;
mod new_object;
mod this;

pub use assign_coalesce::AssignCoalesce;
pub use boolean::{FalseValue, TrueValue};
pub use coalesce::Coalesce;
pub use identical::{Identical, NotIdentical};
pub use new_object::NewObject;
pub use this::This;

use tree_sitter::Node;

use super::syntax::fields;
use crate::core::registry::MutatorRegistry;
use crate::utils::children;

/// Every PHP mutator, in the order they are tried against a node
pub fn catalog() -> MutatorRegistry {
    let mut registry = MutatorRegistry::new();
    registry.register(AssignCoalesce);
    registry.register(Coalesce);
    registry.register(Identical);
    registry.register(NotIdentical);
    registry.register(TrueValue);
    registry.register(FalseValue);
    registry.register(NewObject);
    registry.register(This);
    registry
}

/// The operator token of an expression, if it is exactly `token`.
///
/// Prefers the `operator` field and falls back to scanning anonymous children,
/// whose kind is their literal text.
pub(crate) fn operator_token<'tree>(node: &Node<'tree>, token: &str) -> Option<Node<'tree>> {
    match node.child_by_field_name(fields::OPERATOR) {
        Some(op) => (op.kind() == token).then_some(op),
        None => children(node)
            .into_iter()
            .find(|child| !child.is_named() && child.kind() == token),
    }
}
