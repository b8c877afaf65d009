use tree_sitter::Node;

use super::utils::{calculate_line_offset, node_text};
use crate::types::PartialMutant;

/// Read-only view of the source a tree was parsed from.
///
/// Mutators derive every contextual fact (enclosing scope, declared types,
/// nesting) from the node's ancestry plus this text, so a context can be
/// shared freely between evaluations.
#[derive(Debug, Clone, Copy)]
pub struct MutationContext<'a> {
    source: &'a str,
}

impl<'a> MutationContext<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn text(&self, node: &Node) -> &'a str {
        node_text(node, self.source)
    }

    /// Whitespace preceding `node` on its line, or None if other code precedes it
    pub fn indentation_of(&self, node: &Node) -> Option<&'a str> {
        let start = node.start_byte();
        let line_start = self.source[..start].rfind('\n').map_or(0, |i| i + 1);
        let prefix = &self.source[line_start..start];
        prefix
            .chars()
            .all(|c| c == ' ' || c == '\t')
            .then_some(prefix)
    }

    /// Replace the whole text of `node`
    pub fn replace_node(&self, node: &Node, new_text: impl Into<String>) -> PartialMutant {
        PartialMutant {
            byte_offset: node.start_byte() as u32,
            line_offset: calculate_line_offset(self.source, node.start_byte()),
            old_text: self.text(node).to_string(),
            new_text: new_text.into(),
        }
    }
}
