use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{debug, warn};

use crate::LanguageEngine;
use crate::core::cli::{Args, Commands, PrintArgs};
use crate::core::cmds;
use crate::core::cmds::print::PrintCommand;
use crate::core::cmds::score::ScoreOutcome;
use crate::core::logging::init_logging;
use crate::core::output::ConsoleOutput;
use crate::core::signal::DispatchSignalSubscriberFactory;
use crate::types::AppResult;
use crate::types::config::{CliOverrides, colors_enabled, config, init_with_overrides};

pub const EXIT_THRESHOLD_FAILED: i32 = 1;
pub const EXIT_INTERRUPTED: i32 = 2;

pub async fn run_main(engine: Arc<dyn LanguageEngine>) -> AppResult<()> {
    let args = Args::parse();

    // Handle global arguments
    if let Some(cwd_arg) = args.cwd.as_ref() {
        let cwd = PathBuf::from(cwd_arg).canonicalize()?;
        env::set_current_dir(&cwd)?;
    }

    // Initialize configuration (file, then CLI overrides)
    init_with_overrides(&CliOverrides {
        log_level: args.log_level.clone(),
        log_color: args.log_color.clone(),
    });

    // Initialize logging after config so level/color are applied
    init_logging();
    debug!("Current working directory: {}", env::current_dir()?.display());

    let exit_code = match args.command {
        Commands::Init => {
            cmds::execute_init().await?;
            0
        }
        Commands::Mutate(mutate_args) => {
            let resolved_targets = config()
                .resolve_targets(&mutate_args.targets, mutate_args.ignore_targets.as_deref());
            let mutators = config().resolve_mutators(mutate_args.mutators.as_deref());
            cmds::execute_mutate(mutate_args, engine.as_ref(), resolved_targets, mutators).await?;
            0
        }
        Commands::Score(score_args) => {
            let metrics = config().resolve_metrics(
                score_args.precision,
                score_args.min_msi,
                score_args.min_covered_msi,
            );

            let output = Arc::new(ConsoleOutput::new(colors_enabled()));
            let signals = DispatchSignalSubscriberFactory::new().create(output);
            let signals = match signals.register() {
                Ok(()) => Some(signals),
                Err(e) => {
                    warn!("Ctrl-C will not stop scoring gracefully: {e}");
                    None
                }
            };

            match cmds::execute_score(&score_args.results, metrics, &score_args.format, signals)
                .await?
            {
                ScoreOutcome::Passed => 0,
                ScoreOutcome::ThresholdFailed(_) => EXIT_THRESHOLD_FAILED,
                ScoreOutcome::Interrupted => EXIT_INTERRUPTED,
            }
        }
        Commands::Print {
            command: print_args,
        } => {
            let command = match print_args {
                PrintArgs::Mutators(args) => PrintCommand::Mutators(args.format),
                PrintArgs::Config(args) => PrintCommand::Config(args.format),
            };
            cmds::execute_print(command, engine.as_ref()).await?;
            0
        }
    };

    // Exit with appropriate code
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
