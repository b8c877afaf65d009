use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use similar::TextDiff;

use super::{DetectionStatus, Mutant, ResultError};

/// Captured process output beyond this many bytes is cut off
pub const MAX_PROCESS_OUTPUT_LEN: usize = 1 << 20;

const TRUNCATION_MARKER: &str = "\n[output truncated]";

static TRAILING_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)[ \t\r]+$").expect("static regex"));

/// Outcome of running the test suite against one mutant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMutantExecutionResult")]
pub struct MutantExecutionResult {
    process_command_line: String,
    process_output: String,
    detection_status: DetectionStatus,
    mutant_diff: String,
    mutator_name: String,
    original_file_path: PathBuf,
    original_starting_line: u32,
    original_code: String,
    mutated_code: String,
}

#[derive(Deserialize)]
struct RawMutantExecutionResult {
    process_command_line: String,
    #[serde(default)]
    process_output: String,
    detection_status: DetectionStatus,
    #[serde(default)]
    mutant_diff: String,
    mutator_name: String,
    original_file_path: PathBuf,
    original_starting_line: u32,
    #[serde(default)]
    original_code: String,
    #[serde(default)]
    mutated_code: String,
}

impl TryFrom<RawMutantExecutionResult> for MutantExecutionResult {
    type Error = ResultError;

    fn try_from(raw: RawMutantExecutionResult) -> Result<Self, ResultError> {
        MutantExecutionResult::new(
            raw.process_command_line,
            raw.process_output,
            raw.detection_status,
            raw.mutant_diff,
            raw.mutator_name,
            raw.original_file_path,
            raw.original_starting_line,
            raw.original_code,
            raw.mutated_code,
        )
    }
}

impl MutantExecutionResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        process_command_line: impl Into<String>,
        process_output: impl Into<String>,
        detection_status: DetectionStatus,
        mutant_diff: impl Into<String>,
        mutator_name: impl Into<String>,
        original_file_path: impl Into<PathBuf>,
        original_starting_line: u32,
        original_code: impl Into<String>,
        mutated_code: impl Into<String>,
    ) -> Result<Self, ResultError> {
        let process_command_line = process_command_line.into();
        let mutator_name = mutator_name.into();
        let original_file_path = original_file_path.into();

        if process_command_line.trim().is_empty() {
            return Err(ResultError::EmptyField("process_command_line"));
        }
        if mutator_name.trim().is_empty() {
            return Err(ResultError::EmptyField("mutator_name"));
        }
        if original_file_path.as_os_str().is_empty() {
            return Err(ResultError::EmptyField("original_file_path"));
        }
        if original_starting_line == 0 {
            return Err(ResultError::InvalidLine);
        }

        Ok(Self {
            process_command_line,
            process_output: truncate_output(process_output.into()),
            detection_status,
            mutant_diff: normalize_trailing_spaces(&mutant_diff.into()),
            mutator_name,
            original_file_path,
            original_starting_line,
            original_code: original_code.into(),
            mutated_code: mutated_code.into(),
        })
    }

    /// Build a result for a generated mutant, diffing the original and mutated sources
    pub fn from_mutant(
        mutant: &Mutant,
        original_source: &str,
        mutated_source: &str,
        process_command_line: impl Into<String>,
        process_output: impl Into<String>,
        detection_status: DetectionStatus,
    ) -> Result<Self, ResultError> {
        Self::new(
            process_command_line,
            process_output,
            detection_status,
            unified_diff(original_source, mutated_source),
            mutant.mutator_name.clone(),
            mutant.path.clone(),
            mutant.line(),
            mutant.old_text.clone(),
            mutant.new_text.clone(),
        )
    }

    pub fn process_command_line(&self) -> &str {
        &self.process_command_line
    }

    pub fn process_output(&self) -> &str {
        &self.process_output
    }

    pub fn detection_status(&self) -> DetectionStatus {
        self.detection_status
    }

    pub fn mutant_diff(&self) -> &str {
        &self.mutant_diff
    }

    pub fn mutator_name(&self) -> &str {
        &self.mutator_name
    }

    pub fn original_file_path(&self) -> &PathBuf {
        &self.original_file_path
    }

    pub fn original_starting_line(&self) -> u32 {
        self.original_starting_line
    }

    pub fn original_code(&self) -> &str {
        &self.original_code
    }

    pub fn mutated_code(&self) -> &str {
        &self.mutated_code
    }
}

/// Unified diff between two sources with `Original`/`New` headers
pub fn unified_diff(original: &str, mutated: &str) -> String {
    let diff = TextDiff::from_lines(original, mutated)
        .unified_diff()
        .context_radius(3)
        .header("Original", "New")
        .to_string();
    normalize_trailing_spaces(&diff)
}

/// Strip trailing spaces, tabs and carriage returns from every line
pub fn normalize_trailing_spaces(text: &str) -> String {
    TRAILING_WHITESPACE.replace_all(text, "").into_owned()
}

fn truncate_output(mut output: String) -> String {
    if output.len() <= MAX_PROCESS_OUTPUT_LEN {
        return output;
    }
    let mut cut = MAX_PROCESS_OUTPUT_LEN;
    while !output.is_char_boundary(cut) {
        cut -= 1;
    }
    output.truncate(cut);
    output.push_str(TRUNCATION_MARKER);
    output
}
