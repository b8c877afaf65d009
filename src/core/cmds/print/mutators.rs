use log::info;
use serde::Serialize;

use crate::LanguageEngine;
use crate::core::engine::traits::MutatorCategory;
use crate::types::AppResult;

#[derive(Debug, Serialize)]
struct MutatorInfo {
    name: &'static str,
    category: MutatorCategory,
    description: &'static str,
}

fn describe(engine: &dyn LanguageEngine) -> Vec<MutatorInfo> {
    let mut infos: Vec<MutatorInfo> = engine
        .mutators()
        .iter()
        .map(|m| MutatorInfo {
            name: m.name(),
            category: m.category(),
            description: m.description(),
        })
        .collect();
    infos.sort_by(|a, b| {
        a.category
            .to_string()
            .cmp(&b.category.to_string())
            .then(a.name.cmp(b.name))
    });
    infos
}

pub fn execute(format: &str, engine: &dyn LanguageEngine) -> AppResult<()> {
    let infos = describe(engine);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    info!("Available mutators for {}:", engine.name());
    let width = infos.iter().map(|i| i.name.len()).max().unwrap_or(0);
    let mut category = None;
    for mutator in &infos {
        if category != Some(mutator.category) {
            info!("");
            info!("{}:", mutator.category);
            category = Some(mutator.category);
        }
        info!("  {:<width$}  {}", mutator.name, mutator.description);
    }
    info!("");
    Ok(())
}
