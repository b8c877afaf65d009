pub mod core;
pub mod languages;

// Re-export key items for easy importing in this crate
pub use core::types;

// Re-export key items for easy importing in other crates
pub use core::engine::traits::{LanguageEngine, Mutator};
pub use core::engine::utils;
pub use core::main_shared::run_main;
pub use core::metrics;
pub use core::registry::MutatorRegistry;
pub use languages::php::engine::PhpLanguageEngine;
