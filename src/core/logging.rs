use std::str::FromStr;

use console::style;
use log::{LevelFilter, Record};

use crate::types::config::{colors_enabled, config};

fn level_prefix(record: &Record, colored: bool) -> String {
    let label = record.level().to_string();
    if !colored {
        return format!("[{label}] ");
    }
    let styled = match record.level() {
        log::Level::Error => style(label).red().bold(),
        log::Level::Warn => style(label).yellow().bold(),
        log::Level::Info => style(label).green(),
        log::Level::Debug => style(label).blue(),
        log::Level::Trace => style(label).dim(),
    };
    format!("[{styled}] ")
}

/// Install the global logger from the effective config.
///
/// Info output is user-facing and goes to stdout without decoration;
/// warnings and errors go to stderr; debug/trace carry their target.
pub fn init_logging() {
    let log_config = config().log();
    let level = LevelFilter::from_str(log_config.level()).unwrap_or(LevelFilter::Info);
    let colored = colors_enabled();
    console::set_colors_enabled(colored);
    console::set_colors_enabled_stderr(colored);

    let user_output = fern::Dispatch::new()
        .filter(|meta| meta.level() == log::Level::Info)
        .format(|out, message, _record| out.finish(format_args!("{message}")))
        .chain(std::io::stdout());

    let problems = fern::Dispatch::new()
        .filter(|meta| meta.level() <= log::Level::Warn)
        .format(move |out, message, record| {
            out.finish(format_args!("{}{message}", level_prefix(record, colored)))
        })
        .chain(std::io::stderr());

    let diagnostics = fern::Dispatch::new()
        .filter(|meta| meta.level() >= log::Level::Debug)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}{}: {message}",
                level_prefix(record, colored),
                record.target()
            ))
        })
        .chain(std::io::stderr());

    let result = fern::Dispatch::new()
        .level(level)
        // globset reports every compiled pattern at debug
        .level_for("globset", LevelFilter::Warn)
        .chain(user_output)
        .chain(problems)
        .chain(diagnostics)
        .apply();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}
