use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// All relative paths will be interpreted relative to this directory.
    #[arg(long, global = true)]
    pub cwd: Option<String>,

    /// Logging level (overrides config). One of: trace, debug, info, warn, error
    #[arg(long = "log.level", global = true)]
    pub log_level: Option<String>,

    /// Logging color control: "on" to force colors, "off" to disable; omit for auto
    #[arg(long = "log.color", global = true)]
    pub log_color: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example mewt-php.toml into the current directory
    Init,

    /// Generate mutants for PHP targets and print them with their diffs
    Mutate(MutateArgs),

    /// Score serialized mutant execution results and check MSI thresholds
    Score(ScoreArgs),

    /// Print information about mutators and configuration
    Print {
        #[command(subcommand)]
        command: PrintArgs,
    },
}

/// Arguments for the mutate command
#[derive(Parser, Debug)]
pub struct MutateArgs {
    /// Target(s) to mutate: files, directories, or glob patterns.
    /// Directories are searched recursively for .php and .phtml files.
    #[arg(value_name = "TARGET", required = true)]
    pub targets: Vec<String>,

    /// Comma-separated substrings or globs; matching target paths are ignored.
    /// Replaces config ignore_targets if provided.
    #[arg(long = "ignore-targets")]
    pub ignore_targets: Option<String>,

    /// Comma-separated list of mutator names (e.g., "AssignCoalesce,NewObject").
    /// Use 'print mutators' for the full list. If omitted, all mutators are enabled.
    #[arg(long)]
    pub mutators: Option<String>,

    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the score command
#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// JSON file holding an array of mutant execution results ('-' for stdin)
    #[arg(value_name = "RESULTS")]
    pub results: PathBuf,

    /// Decimal places for reported percentages. Replaces config [metrics].precision
    #[arg(long)]
    pub precision: Option<u32>,

    /// Minimum required MSI percentage. Replaces config [metrics].min_msi
    #[arg(long = "min-msi")]
    pub min_msi: Option<f64>,

    /// Minimum required covered-code MSI percentage. Replaces config [metrics].min_covered_msi
    #[arg(long = "min-covered-msi")]
    pub min_covered_msi: Option<f64>,

    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}

/// Arguments for the print command
#[derive(Subcommand, Debug)]
pub enum PrintArgs {
    /// List all available mutators
    Mutators(PrintFormatArgs),

    /// Print the effective configuration
    Config(PrintFormatArgs),
}

#[derive(Parser, Debug)]
pub struct PrintFormatArgs {
    /// Output format: "table" (default) or "json"
    #[arg(long, default_value = "table")]
    pub format: String,
}
