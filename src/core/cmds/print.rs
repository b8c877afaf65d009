use crate::LanguageEngine;
use crate::types::AppResult;

pub mod config;
pub mod mutators;

pub enum PrintCommand {
    Mutators(String),
    Config(String),
}

pub async fn execute_print(command: PrintCommand, engine: &dyn LanguageEngine) -> AppResult<()> {
    match command {
        PrintCommand::Mutators(format) => mutators::execute(&format, engine),
        PrintCommand::Config(format) => config::execute(&format),
    }
}
