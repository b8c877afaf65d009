pub mod cli;
pub mod cmds;
pub mod engine;
pub mod events;
pub mod logging;
pub mod main_shared;
pub mod metrics;
pub mod output;
pub mod registry;
pub mod signal;
pub mod types;
