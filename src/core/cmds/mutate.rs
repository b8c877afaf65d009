use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::Serialize;

use crate::LanguageEngine;
use crate::core::cli::MutateArgs;
use crate::types::config::ResolvedTargets;
use crate::types::{AppResult, Mutant, Target, unified_diff};

#[derive(Debug, Serialize)]
struct RenderedMutant<'a> {
    #[serde(flatten)]
    mutant: &'a Mutant,
    line: u32,
    diff: String,
}

fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

/// Mutants for every target, in target order
pub fn generate_all(
    targets: &[Target],
    engine: &dyn LanguageEngine,
    mutators: Option<&[String]>,
) -> Vec<(usize, Vec<Mutant>)> {
    let bar = progress_bar(targets.len());
    let generated = targets
        .iter()
        .enumerate()
        .map(|(idx, target)| {
            bar.set_message(target.display());
            let mutants = target.generate_mutants(engine, mutators);
            bar.inc(1);
            (idx, mutants)
        })
        .collect();
    bar.finish_and_clear();
    generated
}

pub async fn execute_mutate(
    args: MutateArgs,
    engine: &dyn LanguageEngine,
    resolved_targets: ResolvedTargets,
    mutators: Option<Vec<String>>,
) -> AppResult<usize> {
    info!(
        "Generating mutants for targets: {:?}",
        resolved_targets.include
    );

    let targets = Target::load_targets(&resolved_targets, engine)?;
    let generated = generate_all(&targets, engine, mutators.as_deref());

    let mut rendered = Vec::new();
    let mut total_mutants = 0;
    for (idx, mutants) in &generated {
        let target = &targets[*idx];
        info!(
            "Generated {} mutants for {}",
            mutants.len(),
            target.display()
        );
        total_mutants += mutants.len();

        for mutant in mutants {
            let mutated = match target.mutate(mutant) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping mutant {}: {}", mutant.hash.short(), e);
                    continue;
                }
            };
            let diff = unified_diff(&target.text, &mutated);
            if args.format == "json" {
                rendered.push(RenderedMutant {
                    mutant,
                    line: mutant.line(),
                    diff,
                });
            } else {
                info!("{}", mutant.display(target));
                for line in diff.lines() {
                    info!("    {line}");
                }
            }
        }
    }

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        info!(
            "Generated {} mutants for {} target(s)",
            total_mutants,
            targets.len()
        );
    }

    Ok(total_mutants)
}
