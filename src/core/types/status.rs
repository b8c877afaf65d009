use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Terminal classification of a mutant's test run
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionStatus {
    Killed,
    Error,
    SyntaxError,
    Escaped,
    TimedOut,
    Skipped,
    NotCovered,
}

impl DetectionStatus {
    /// The test suite noticed the change
    pub fn is_detected(&self) -> bool {
        matches!(
            self,
            DetectionStatus::Killed | DetectionStatus::Error | DetectionStatus::TimedOut
        )
    }

    /// Counts toward the scoring denominators. Skipped mutants were never attempted.
    pub fn is_considered(&self) -> bool {
        *self != DetectionStatus::Skipped
    }

    pub fn display(&self) -> String {
        match self {
            DetectionStatus::Killed => "Killed",
            DetectionStatus::Error => "Error",
            DetectionStatus::SyntaxError => "SyntaxErr",
            DetectionStatus::Escaped => "Escaped",
            DetectionStatus::TimedOut => "Timeout",
            DetectionStatus::Skipped => "Skipped",
            DetectionStatus::NotCovered => "NoCover",
        }
        .to_string()
    }
}
