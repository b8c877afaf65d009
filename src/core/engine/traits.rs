use std::path::Path;

use serde::Serialize;
use strum::{Display, EnumString};
use tree_sitter::{Language as TsLanguage, Node};

use super::context::MutationContext;
use crate::core::registry::MutatorRegistry;
use crate::types::{Mutant, PartialMutant, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
pub enum MutatorCategory {
    Operator,
    ReturnValue,
    Boolean,
}

/// A single mutation rule.
///
/// Mutators hold no state between invocations, so the same instance can be
/// evaluated against many nodes concurrently. `mutate` is only meaningful after
/// `applies` returned true; returning `None` is treated the same as declining.
pub trait Mutator: Send + Sync {
    /// Stable name, used as the mutator name on results and as a grouping key in reports
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn category(&self) -> MutatorCategory;

    /// Whether this rule can safely rewrite `node`. Undecidable facts mean "no".
    fn applies(&self, node: &Node, ctx: &MutationContext) -> bool;

    /// Produce the replacement for `node`
    fn mutate(&self, node: &Node, ctx: &MutationContext) -> Option<PartialMutant>;
}

/// Core trait that language implementations must provide
pub trait LanguageEngine: Send + Sync {
    /// Language name (e.g., "PHP")
    fn name(&self) -> &'static str;

    /// File extensions this language handles (e.g., ["php"])
    fn extensions(&self) -> &[&'static str];

    /// Get the tree-sitter Language for parsing
    fn tree_sitter_language(&self) -> TsLanguage;

    /// The mutator catalog for this language
    fn mutators(&self) -> &MutatorRegistry;

    /// Apply the named mutators to a target and return mutants
    fn apply_mutators(&self, target: &Target, names: &[&str]) -> Vec<Mutant>;

    /// Apply every mutator in the catalog to a target
    fn apply_all_mutations(&self, target: &Target) -> Vec<Mutant> {
        let names = self.mutators().names();
        self.apply_mutators(target, &names)
    }

    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}
