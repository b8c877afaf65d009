use std::sync::OnceLock;

use log::{debug, warn};
use tree_sitter::Language as TsLanguage;

use super::mutators;
use crate::LanguageEngine;
use crate::core::engine::context::MutationContext;
use crate::core::registry::MutatorRegistry;
use crate::types::{Mutant, Target};
use crate::utils::{is_in_comment, parse_source, visit_nodes_with_cursor};

static PHP_LANGUAGE: OnceLock<TsLanguage> = OnceLock::new();

pub struct PhpLanguageEngine {
    mutators: MutatorRegistry,
}

impl Default for PhpLanguageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhpLanguageEngine {
    pub fn new() -> Self {
        Self {
            mutators: mutators::catalog(),
        }
    }
}

impl LanguageEngine for PhpLanguageEngine {
    fn name(&self) -> &'static str {
        "PHP"
    }

    fn extensions(&self) -> &[&'static str] {
        &["php", "phtml"]
    }

    fn tree_sitter_language(&self) -> TsLanguage {
        PHP_LANGUAGE
            .get_or_init(|| tree_sitter_php::LANGUAGE_PHP.into())
            .clone()
    }

    fn mutators(&self) -> &MutatorRegistry {
        &self.mutators
    }

    fn apply_mutators(&self, target: &Target, names: &[&str]) -> Vec<Mutant> {
        let selected = self.mutators.select(names);
        if selected.is_empty() {
            return Vec::new();
        }

        let source = &target.text;
        let tree = match parse_source(source, &self.tree_sitter_language()) {
            Some(t) => t,
            None => {
                warn!("Failed to parse {}", target.display());
                return Vec::new();
            }
        };
        let root = tree.root_node();
        if root.has_error() {
            debug!(
                "{} contains syntax errors; only well-formed regions are mutated",
                target.display()
            );
        }

        let ctx = MutationContext::new(source);
        let mut all_mutants = Vec::new();
        let mut cursor = root.walk();
        visit_nodes_with_cursor(root, &mut cursor, &mut |node| {
            if node.is_error() || is_in_comment(&node) {
                return;
            }
            for mutator in &selected {
                if !mutator.applies(&node, &ctx) {
                    continue;
                }
                if let Some(partial) = mutator.mutate(&node, &ctx) {
                    all_mutants.push(Mutant::from_partial(partial, target, mutator.name()));
                }
            }
        });
        all_mutants
    }
}
