pub mod config;
mod error;
mod hash;
mod mutant;
mod result;
mod status;
mod target;

pub use error::*;
pub use hash::*;
pub use mutant::*;
pub use result::*;
pub use status::*;
pub use target::*;
