use log::info;

use crate::types::AppResult;
use crate::types::config::config;

pub fn execute(format: &str) -> AppResult<()> {
    let effective_config = config().to_effective();

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&effective_config)?);
            return Ok(());
        }
        "toml" => {
            println!("{}", toml::to_string_pretty(&effective_config)?);
            return Ok(());
        }
        _ => {}
    }

    let log = effective_config.log();
    let metrics = effective_config.metrics();

    info!("Effective Configuration:");
    info!("");
    info!("Targets:");
    let ignore = effective_config.ignore_targets();
    if ignore.is_empty() {
        info!("  ignore: []");
    } else {
        info!("  ignore: [{}]", ignore.join(", "));
    }
    match effective_config.mutators() {
        Some(names) => info!("  mutators: [{}]", names.join(", ")),
        None => info!("  mutators: all enabled"),
    }

    info!("");
    info!("Log:");
    info!("  level: {}", log.level());
    match log.color() {
        Some(true) => info!("  color: on"),
        Some(false) => info!("  color: off"),
        None => info!("  color: auto"),
    }

    info!("");
    info!("Metrics:");
    info!("  precision: {}", metrics.precision());
    match metrics.min_msi() {
        Some(min) => info!("  min_msi: {min}%"),
        None => info!("  min_msi: (not set)"),
    }
    match metrics.min_covered_msi() {
        Some(min) => info!("  min_covered_msi: {min}%"),
        None => info!("  min_covered_msi: (not set)"),
    }
    info!(
        "  ignore_msi_with_no_mutations: {}",
        metrics.ignore_msi_with_no_mutations()
    );

    Ok(())
}
