mod calculator;
mod collector;
mod thresholds;

pub use calculator::*;
pub use collector::*;
pub use thresholds::*;

pub const DEFAULT_ROUNDING_PRECISION: u32 = 2;
