pub mod engine;
pub mod mutators;
pub mod scope;
pub mod syntax;
