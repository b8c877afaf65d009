use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::types::AppResult;
use crate::types::config::CONFIG_FILENAME;

const EXAMPLE_CONFIG: &str = include_str!("../../../example.toml");

pub async fn execute_init() -> AppResult<()> {
    let cfg_path = Path::new(CONFIG_FILENAME);
    if cfg_path.exists() {
        warn!("{CONFIG_FILENAME} already exists; leaving it unchanged");
        return Ok(());
    }
    fs::write(cfg_path, EXAMPLE_CONFIG)?;
    info!("Created {}", cfg_path.display());
    Ok(())
}
