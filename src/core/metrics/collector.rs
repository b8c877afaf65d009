use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use strum::IntoEnumIterator;

use super::calculator::{Calculator, capped_precision};
use crate::types::{DetectionStatus, MutantExecutionResult};

/// Anything that accepts finished mutant results
pub trait Collector: Send + Sync {
    fn collect(&self, results: &[Arc<MutantExecutionResult>]);

    fn collect_one(&self, result: Arc<MutantExecutionResult>) {
        self.collect(&[result]);
    }
}

// A panic in another producer must not take the whole aggregate down with it;
// every critical section leaves the buckets consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Append-only store of results grouped by detection status.
///
/// Safe to feed from many producers at once: each `collect` call appends its
/// whole batch inside one critical section.
#[derive(Debug, Default)]
pub struct ResultsCollector {
    buckets: Mutex<HashMap<DetectionStatus, Vec<Arc<MutantExecutionResult>>>>,
}

impl ResultsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, status: DetectionStatus) -> usize {
        lock(&self.buckets).get(&status).map_or(0, Vec::len)
    }

    /// Snapshot of the results received with `status`, in arrival order
    pub fn results(&self, status: DetectionStatus) -> Vec<Arc<MutantExecutionResult>> {
        lock(&self.buckets).get(&status).cloned().unwrap_or_default()
    }

    /// Snapshot of every result, grouped in status declaration order
    pub fn all_results(&self) -> Vec<Arc<MutantExecutionResult>> {
        let buckets = lock(&self.buckets);
        DetectionStatus::iter()
            .filter_map(|status| buckets.get(&status))
            .flatten()
            .cloned()
            .collect()
    }

    pub fn total(&self) -> usize {
        lock(&self.buckets).values().map(Vec::len).sum()
    }
}

impl Collector for ResultsCollector {
    fn collect(&self, results: &[Arc<MutantExecutionResult>]) {
        let mut buckets = lock(&self.buckets);
        for result in results {
            buckets
                .entry(result.detection_status())
                .or_default()
                .push(Arc::clone(result));
        }
    }
}

/// Per-status tallies, copied out of a `MetricsCalculator` when scoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub killed: usize,
    pub error: usize,
    pub syntax_error: usize,
    pub escaped: usize,
    pub timed_out: usize,
    pub skipped: usize,
    pub not_covered: usize,
}

impl StatusCounts {
    fn increment(&mut self, status: DetectionStatus) {
        let slot = match status {
            DetectionStatus::Killed => &mut self.killed,
            DetectionStatus::Error => &mut self.error,
            DetectionStatus::SyntaxError => &mut self.syntax_error,
            DetectionStatus::Escaped => &mut self.escaped,
            DetectionStatus::TimedOut => &mut self.timed_out,
            DetectionStatus::Skipped => &mut self.skipped,
            DetectionStatus::NotCovered => &mut self.not_covered,
        };
        *slot += 1;
    }

    pub fn get(&self, status: DetectionStatus) -> usize {
        match status {
            DetectionStatus::Killed => self.killed,
            DetectionStatus::Error => self.error,
            DetectionStatus::SyntaxError => self.syntax_error,
            DetectionStatus::Escaped => self.escaped,
            DetectionStatus::TimedOut => self.timed_out,
            DetectionStatus::Skipped => self.skipped,
            DetectionStatus::NotCovered => self.not_covered,
        }
    }

    /// Every collected result, skipped ones included
    pub fn total(&self) -> usize {
        DetectionStatus::iter().map(|status| self.get(status)).sum()
    }

    /// Results that count toward the scoring denominators
    pub fn considered(&self) -> usize {
        self.sum_where(DetectionStatus::is_considered)
    }

    /// Results the test suite noticed
    pub fn detected(&self) -> usize {
        self.sum_where(DetectionStatus::is_detected)
    }

    fn sum_where(&self, predicate: impl Fn(&DetectionStatus) -> bool) -> usize {
        DetectionStatus::iter()
            .filter(|status| predicate(status))
            .map(|status| self.get(status))
            .sum()
    }
}

#[derive(Debug, Default)]
struct MetricsState {
    counts: StatusCounts,
    calculator: Option<Calculator>,
}

/// A results collector that also keeps the counts scoring needs.
///
/// The derived `Calculator` is cached until the next `collect`.
#[derive(Debug)]
pub struct MetricsCalculator {
    rounding_precision: u32,
    results: ResultsCollector,
    state: Mutex<MetricsState>,
}

impl MetricsCalculator {
    pub fn new(rounding_precision: u32) -> Self {
        Self {
            rounding_precision: capped_precision(rounding_precision),
            results: ResultsCollector::new(),
            state: Mutex::new(MetricsState::default()),
        }
    }

    pub fn rounding_precision(&self) -> u32 {
        self.rounding_precision
    }

    /// Consistent copy of all per-status counts
    pub fn counts(&self) -> StatusCounts {
        lock(&self.state).counts
    }

    pub fn killed_count(&self) -> usize {
        self.counts().killed
    }

    pub fn error_count(&self) -> usize {
        self.counts().error
    }

    pub fn syntax_error_count(&self) -> usize {
        self.counts().syntax_error
    }

    pub fn escaped_count(&self) -> usize {
        self.counts().escaped
    }

    pub fn timed_out_count(&self) -> usize {
        self.counts().timed_out
    }

    pub fn skipped_count(&self) -> usize {
        self.counts().skipped
    }

    pub fn not_tested_count(&self) -> usize {
        self.counts().not_covered
    }

    pub fn total_mutants_count(&self) -> usize {
        self.counts().total()
    }

    /// The underlying grouped results, for report generators
    pub fn results(&self) -> &ResultsCollector {
        &self.results
    }

    /// Scores for everything collected so far
    pub fn calculator(&self) -> Calculator {
        let mut state = lock(&self.state);
        if let Some(calculator) = &state.calculator {
            return calculator.clone();
        }
        let calculator = Calculator::from_counts(self.rounding_precision, &state.counts);
        state.calculator = Some(calculator.clone());
        calculator
    }
}

impl Collector for MetricsCalculator {
    fn collect(&self, results: &[Arc<MutantExecutionResult>]) {
        if results.is_empty() {
            return;
        }
        // Counts and buckets are updated under the metrics lock so readers
        // never see counts that disagree with the stored results.
        let mut state = lock(&self.state);
        for result in results {
            state.counts.increment(result.detection_status());
        }
        state.calculator = None;
        self.results.collect(results);
    }
}
