use std::path::PathBuf;

use serde::Serialize;

use super::{MutantHash, Target};

/// A single text replacement produced by a mutator, before it is tied to a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialMutant {
    pub byte_offset: u32,
    pub line_offset: u32,
    pub old_text: String,
    pub new_text: String,
}

/// One candidate program: a single mutator applied to a single node of a target
#[derive(Debug, Clone, Serialize)]
pub struct Mutant {
    pub hash: MutantHash,
    pub path: PathBuf,
    pub byte_offset: u32,
    /// 0-based line of the first mutated byte
    pub line_offset: u32,
    pub old_text: String,
    pub new_text: String,
    pub mutator_name: String,
}

impl Mutant {
    pub fn from_partial(partial: PartialMutant, target: &Target, mutator_name: &str) -> Self {
        let path = target.path.to_string_lossy();
        let offset = partial.byte_offset.to_string();
        let hash = MutantHash::of_parts(&[
            &path,
            mutator_name,
            &offset,
            &partial.old_text,
            &partial.new_text,
        ]);
        Self {
            hash,
            path: target.path.clone(),
            byte_offset: partial.byte_offset,
            line_offset: partial.line_offset,
            old_text: partial.old_text,
            new_text: partial.new_text,
            mutator_name: mutator_name.to_string(),
        }
    }

    /// 1-based line of the mutation site
    pub fn line(&self) -> u32 {
        self.line_offset + 1
    }

    pub fn display(&self, target: &Target) -> String {
        format!(
            "{}:{} [{}] {} {} -> {}",
            target.display(),
            self.line(),
            self.hash.short(),
            self.mutator_name,
            one_line(&self.old_text),
            one_line(&self.new_text)
        )
    }
}

fn one_line(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > 60 {
        let head: String = collapsed.chars().take(57).collect();
        format!("{head}...")
    } else {
        collapsed
    }
}
