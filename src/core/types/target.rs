use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::LanguageEngine;
use crate::types::Mutant;
use crate::types::config::{ResolvedTargets, is_path_excluded};

/// A source file loaded for mutation
#[derive(Debug, Clone, Serialize)]
pub struct Target {
    pub path: PathBuf,
    #[serde(skip)]
    pub text: String,
    pub language: String,
}

impl Target {
    /// Build a target from in-memory source, without touching the filesystem
    pub fn from_source(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            text: text.to_string(),
            language: "PHP".to_string(),
        }
    }

    /// Returns a cwd-relative path string suitable for logging
    pub fn display(&self) -> String {
        if let Ok(cwd) = std::env::current_dir() {
            let target_abs = if self.path.is_absolute() {
                self.path.clone()
            } else {
                cwd.join(&self.path)
            };

            if let Ok(relative) = target_abs.strip_prefix(&cwd) {
                let s = relative.to_string_lossy().to_string();
                if s.is_empty() { ".".to_string() } else { s }
            } else {
                self.path.to_string_lossy().to_string()
            }
        } else {
            self.path.to_string_lossy().to_string()
        }
    }

    /// Expand files, directories and glob patterns into targets the engine understands
    pub fn load_targets(
        resolved_targets: &ResolvedTargets,
        engine: &dyn LanguageEngine,
    ) -> io::Result<Vec<Target>> {
        let mut all_targets: Vec<Target> = vec![];

        for pattern in &resolved_targets.include {
            let path = PathBuf::from(pattern);

            if path.is_file() {
                if !is_path_excluded(&path, &resolved_targets.ignore)
                    && let Some(target) = Self::load_single_file(path, engine)?
                {
                    all_targets.push(target);
                }
            } else if path.is_dir() {
                all_targets.extend(Self::load_from_directory(
                    &path,
                    engine,
                    &resolved_targets.ignore,
                )?);
            } else {
                let paths = glob::glob(pattern).map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("Invalid glob pattern '{}': {}", pattern, e),
                    )
                })?;
                for entry in paths {
                    match entry {
                        Ok(glob_path) if glob_path.is_file() => {
                            if !is_path_excluded(&glob_path, &resolved_targets.ignore)
                                && let Some(target) = Self::load_single_file(glob_path, engine)?
                            {
                                all_targets.push(target);
                            }
                        }
                        Ok(glob_path) if glob_path.is_dir() => {
                            all_targets.extend(Self::load_from_directory(
                                &glob_path,
                                engine,
                                &resolved_targets.ignore,
                            )?);
                        }
                        Ok(_) => {}
                        Err(e) => info!("Skipping invalid glob entry: {}", e),
                    }
                }
            }
        }

        if all_targets.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No valid targets found after filtering",
            ));
        }

        all_targets.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(all_targets)
    }

    fn load_single_file(
        target_path: PathBuf,
        engine: &dyn LanguageEngine,
    ) -> io::Result<Option<Target>> {
        if !engine.handles(&target_path) {
            debug!(
                "Skipping file {}: not a {} source",
                target_path.display(),
                engine.name()
            );
            return Ok(None);
        }
        let text = fs::read_to_string(&target_path)?;
        Ok(Some(Target {
            path: target_path,
            text,
            language: engine.name().to_string(),
        }))
    }

    fn load_from_directory(
        dir_path: &Path,
        engine: &dyn LanguageEngine,
        ignore_patterns: &[String],
    ) -> io::Result<Vec<Target>> {
        if is_path_excluded(dir_path, ignore_patterns) {
            return Ok(vec![]);
        }

        let mut targets = vec![];
        for entry in fs::read_dir(dir_path)? {
            let path = entry?.path();
            if path.is_file() {
                if !is_path_excluded(&path, ignore_patterns)
                    && let Some(target) = Self::load_single_file(path, engine)?
                {
                    targets.push(target);
                }
            } else if path.is_dir() {
                targets.extend(Self::load_from_directory(&path, engine, ignore_patterns)?);
            }
        }
        Ok(targets)
    }

    /// Run the engine's mutator catalog, optionally restricted to the named mutators
    pub fn generate_mutants(
        &self,
        engine: &dyn LanguageEngine,
        enabled: Option<&[String]>,
    ) -> Vec<Mutant> {
        match enabled {
            Some(names) => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                engine.apply_mutators(self, &names)
            }
            None => engine.apply_all_mutations(self),
        }
    }

    /// Render the full source of this target with the mutant spliced in
    pub fn mutate(&self, mutant: &Mutant) -> io::Result<String> {
        if mutant.path != self.path {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "Mutant applies to {}, not {}",
                    mutant.path.display(),
                    self.path.display()
                ),
            ));
        }
        let start = mutant.byte_offset as usize;
        let end = start + mutant.old_text.len();
        if self.text.get(start..end) != Some(mutant.old_text.as_str()) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Mutant text does not match {} at byte {}",
                    self.path.display(),
                    start
                ),
            ));
        }
        let mut mutated = String::with_capacity(self.text.len() + mutant.new_text.len());
        mutated.push_str(&self.text[..start]);
        mutated.push_str(&mutant.new_text);
        mutated.push_str(&self.text[end..]);
        Ok(mutated)
    }
}
