use std::sync::OnceLock;

use log::warn;

use super::collector::{MetricsCalculator, StatusCounts};

/// Precision is capped so that `10^precision` and the scaled numerator stay within `u128`
pub const MAX_ROUNDING_PRECISION: u32 = 12;

/// Clamp a requested precision to `MAX_ROUNDING_PRECISION`, warning when it is lowered
pub fn capped_precision(requested: u32) -> u32 {
    if requested > MAX_ROUNDING_PRECISION {
        warn!(
            "Rounding precision {requested} exceeds the maximum of {MAX_ROUNDING_PRECISION}; using {MAX_ROUNDING_PRECISION}"
        );
        return MAX_ROUNDING_PRECISION;
    }
    requested
}

/// Immutable snapshot of the counts that drive the three mutation scores.
///
/// Each score is computed on first access and then reused, so repeated reads
/// return bit-identical values.
#[derive(Debug, Clone)]
pub struct Calculator {
    rounding_precision: u32,
    killed_count: usize,
    error_count: usize,
    timed_out_count: usize,
    not_tested_count: usize,
    total_mutants_count: usize,
    msi: OnceLock<f64>,
    coverage_rate: OnceLock<f64>,
    covered_msi: OnceLock<f64>,
}

impl Calculator {
    /// `total_mutants_count` must exclude skipped mutants
    pub fn new(
        rounding_precision: u32,
        killed_count: usize,
        error_count: usize,
        timed_out_count: usize,
        not_tested_count: usize,
        total_mutants_count: usize,
    ) -> Self {
        Self {
            rounding_precision: capped_precision(rounding_precision),
            killed_count,
            error_count,
            timed_out_count,
            not_tested_count,
            total_mutants_count,
            msi: OnceLock::new(),
            coverage_rate: OnceLock::new(),
            covered_msi: OnceLock::new(),
        }
    }

    /// Snapshot the counts of a metrics calculator. Later collection does not affect the result.
    pub fn from_metrics(metrics: &MetricsCalculator) -> Self {
        metrics.calculator()
    }

    pub(crate) fn from_counts(rounding_precision: u32, counts: &StatusCounts) -> Self {
        // Syntax errors stay in the denominator and count as not detected
        Self::new(
            rounding_precision,
            counts.killed,
            counts.error,
            counts.timed_out,
            counts.not_covered,
            counts.considered(),
        )
    }

    pub fn rounding_precision(&self) -> u32 {
        self.rounding_precision
    }

    pub fn detected_count(&self) -> usize {
        self.killed_count + self.error_count + self.timed_out_count
    }

    pub fn not_tested_count(&self) -> usize {
        self.not_tested_count
    }

    pub fn total_mutants_count(&self) -> usize {
        self.total_mutants_count
    }

    pub fn covered_count(&self) -> usize {
        self.total_mutants_count.saturating_sub(self.not_tested_count)
    }

    /// Percentage of all considered mutants that the tests detected
    pub fn mutation_score_indicator(&self) -> f64 {
        *self.msi.get_or_init(|| {
            percentage(
                self.detected_count(),
                self.total_mutants_count,
                self.rounding_precision,
            )
        })
    }

    /// Percentage of considered mutants exercised by at least one test
    pub fn coverage_rate(&self) -> f64 {
        *self.coverage_rate.get_or_init(|| {
            percentage(
                self.covered_count(),
                self.total_mutants_count,
                self.rounding_precision,
            )
        })
    }

    /// Percentage of exercised mutants that the tests detected
    pub fn covered_code_mutation_score_indicator(&self) -> f64 {
        *self.covered_msi.get_or_init(|| {
            percentage(
                self.detected_count(),
                self.covered_count(),
                self.rounding_precision,
            )
        })
    }
}

/// `100 * numerator / denominator`, rounded half-up to `precision` decimals.
///
/// Rounding is done on exact integers so that e.g. 84.615 rounds to 84.62
/// regardless of how the quotient would be represented as a float.
fn percentage(numerator: usize, denominator: usize, precision: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let scale = 10u128.pow(precision);
    let scaled = numerator as u128 * 100 * scale;
    let denominator = denominator as u128;
    let rounded = (2 * scaled + denominator) / (2 * denominator);
    rounded as f64 / scale as f64
}
