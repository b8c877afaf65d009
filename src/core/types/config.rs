use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::core::metrics::DEFAULT_ROUNDING_PRECISION;

pub const CONFIG_FILENAME: &str = "mewt-php.toml";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LogConfig {
    pub level: Option<String>,
    pub color: Option<bool>, // None = auto-detect (semantic)
}

impl LogConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn color(&self) -> Option<bool> {
        self.color
    }

    pub fn to_effective(&self) -> Self {
        Self {
            level: Some(self.level().to_string()),
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MetricsConfig {
    pub precision: Option<u32>,
    pub min_msi: Option<f64>,
    pub min_covered_msi: Option<f64>,
    pub ignore_msi_with_no_mutations: Option<bool>,
}

impl MetricsConfig {
    pub fn precision(&self) -> u32 {
        self.precision.unwrap_or(DEFAULT_ROUNDING_PRECISION)
    }

    pub fn min_msi(&self) -> Option<f64> {
        self.min_msi
    }

    pub fn min_covered_msi(&self) -> Option<f64> {
        self.min_covered_msi
    }

    pub fn ignore_msi_with_no_mutations(&self) -> bool {
        self.ignore_msi_with_no_mutations.unwrap_or(false)
    }

    pub fn to_effective(&self) -> Self {
        Self {
            precision: Some(self.precision()),
            min_msi: self.min_msi,
            min_covered_msi: self.min_covered_msi,
            ignore_msi_with_no_mutations: Some(self.ignore_msi_with_no_mutations()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    pub ignore_targets: Option<Vec<String>>,
    pub mutators: Option<Vec<String>>, // None = all enabled (semantic)

    pub log: Option<LogConfig>,
    pub metrics: Option<MetricsConfig>,
}

impl Config {
    pub fn ignore_targets(&self) -> &[String] {
        self.ignore_targets.as_deref().unwrap_or(&[])
    }

    pub fn mutators(&self) -> Option<&[String]> {
        self.mutators.as_deref()
    }

    pub fn log(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }

    pub fn metrics(&self) -> MetricsConfig {
        self.metrics.clone().unwrap_or_default()
    }

    pub fn to_effective(&self) -> Self {
        Self {
            ignore_targets: Some(self.ignore_targets().to_vec()),
            mutators: self.mutators.clone(),
            log: Some(self.log().to_effective()),
            metrics: Some(self.metrics().to_effective()),
        }
    }

    /// Targets from the command line, ignore list from CLI csv (if given) on top of config
    pub fn resolve_targets(
        &self,
        targets: &[String],
        ignore_csv: Option<&str>,
    ) -> ResolvedTargets {
        let mut ignore = self.ignore_targets().to_vec();
        if let Some(csv) = ignore_csv {
            ignore = parse_csv(csv);
        }
        ResolvedTargets {
            include: targets.to_vec(),
            ignore,
        }
    }

    /// CLI list replaces the configured list; None means every mutator is enabled
    pub fn resolve_mutators(&self, cli_csv: Option<&str>) -> Option<Vec<String>> {
        match cli_csv {
            Some(csv) => {
                let list = parse_csv(csv);
                if list.is_empty() { None } else { Some(list) }
            }
            None => self.mutators.clone(),
        }
    }

    /// Metrics settings with any CLI values taking precedence
    pub fn resolve_metrics(
        &self,
        precision: Option<u32>,
        min_msi: Option<f64>,
        min_covered_msi: Option<f64>,
    ) -> MetricsConfig {
        let mut metrics = self.metrics();
        if precision.is_some() {
            metrics.precision = precision;
        }
        if min_msi.is_some() {
            metrics.min_msi = min_msi;
        }
        if min_covered_msi.is_some() {
            metrics.min_covered_msi = min_covered_msi;
        }
        metrics.to_effective()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedTargets {
    pub include: Vec<String>,
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub log_color: Option<String>, // "on" | "off"
}

static CONFIG: OnceCell<Config> = OnceCell::new();

pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        let mut cfg = Config::default();
        if let Some(path) = find_nearest_config_file()
            && let Some(file_cfg) = read_config_file(&path)
        {
            apply_file_config(&mut cfg, &file_cfg);
        }
        cfg
    })
}

pub fn init_with_overrides(overrides: &CliOverrides) {
    let mut cfg = Config::default();

    // 1) Config file: walk up from cwd and use the first config file found
    if let Some(path) = find_nearest_config_file()
        && let Some(file_cfg) = read_config_file(&path)
    {
        apply_file_config(&mut cfg, &file_cfg);
    }

    // 2) CLI arguments (highest priority). Only override if user specified.
    apply_cli_overrides(&mut cfg, overrides);

    let _ = CONFIG.set(cfg);
}

fn read_config_file(path: &Path) -> Option<Config> {
    let contents = fs::read_to_string(path).ok()?;
    match toml::from_str::<Config>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!("Ignoring malformed config {}: {}", path.display(), e);
            None
        }
    }
}

fn apply_file_config(cfg: &mut Config, file: &Config) {
    if let Some(targets) = &file.ignore_targets {
        cfg.ignore_targets = Some(
            cfg.ignore_targets()
                .iter()
                .chain(targets.iter())
                .cloned()
                .collect(),
        );
    }
    if file.mutators.is_some() {
        cfg.mutators = file.mutators.clone(); // override semantics
    }

    if let Some(file_log) = &file.log {
        let mut log = cfg.log.clone().unwrap_or_default();
        if file_log.level.is_some() {
            log.level = file_log.level.clone();
        }
        if file_log.color.is_some() {
            log.color = file_log.color;
        }
        cfg.log = Some(log);
    }

    if let Some(file_metrics) = &file.metrics {
        let mut metrics = cfg.metrics.clone().unwrap_or_default();
        if file_metrics.precision.is_some() {
            metrics.precision = file_metrics.precision;
        }
        if file_metrics.min_msi.is_some() {
            metrics.min_msi = file_metrics.min_msi;
        }
        if file_metrics.min_covered_msi.is_some() {
            metrics.min_covered_msi = file_metrics.min_covered_msi;
        }
        if file_metrics.ignore_msi_with_no_mutations.is_some() {
            metrics.ignore_msi_with_no_mutations = file_metrics.ignore_msi_with_no_mutations;
        }
        cfg.metrics = Some(metrics);
    }
}

fn apply_cli_overrides(cfg: &mut Config, overrides: &CliOverrides) {
    let mut log = cfg.log.clone().unwrap_or_default();
    if let Some(level) = &overrides.log_level
        && !level.trim().is_empty()
    {
        log.level = Some(level.trim().to_string());
    }
    if let Some(color_str) = &overrides.log_color {
        match color_str.to_lowercase().as_str() {
            "on" => log.color = Some(true),
            "off" => log.color = Some(false),
            _ => {}
        }
    }
    if overrides.log_level.is_some() || overrides.log_color.is_some() {
        cfg.log = Some(log);
    }
}

fn parse_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn find_nearest_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.exists())
}

pub fn colors_enabled() -> bool {
    match config().log().color() {
        Some(force) => force,
        None => console::colors_enabled(),
    }
}

/// A path is excluded if it contains any ignore entry as a substring or matches it as a glob
pub fn is_path_excluded(path: &Path, ignore_patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy();
    ignore_patterns
        .iter()
        .filter(|p| !p.is_empty())
        .any(|pat| path_str.contains(pat.as_str()) || glob_matches(pat, path))
}

fn glob_matches(pattern: &str, path: &Path) -> bool {
    match globset::Glob::new(pattern) {
        Ok(glob) => glob.compile_matcher().is_match(path),
        Err(_) => false,
    }
}
