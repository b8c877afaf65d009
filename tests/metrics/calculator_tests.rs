use std::sync::Arc;

use mewt_php::metrics::{Calculator, Collector, MetricsCalculator};
use mewt_php::types::{DetectionStatus, MutantExecutionResult};
use strum::IntoEnumIterator;

fn assert_scores(calculator: &Calculator, msi: f64, coverage_rate: f64, covered_msi: f64) {
    assert_eq!(calculator.mutation_score_indicator(), msi, "MSI");
    assert_eq!(calculator.coverage_rate(), coverage_rate, "coverage rate");
    assert_eq!(
        calculator.covered_code_mutation_score_indicator(),
        covered_msi,
        "covered MSI"
    );
}

fn result(status: DetectionStatus) -> Arc<MutantExecutionResult> {
    Arc::new(
        MutantExecutionResult::new(
            "vendor/bin/phpunit --filter FooTest",
            "OK (3 tests, 5 assertions)",
            status,
            "--- Original\n+++ New\n",
            "NewObject",
            "src/Foo.php",
            10,
            "return new Foo();",
            "new Foo();\nreturn null;",
        )
        .unwrap(),
    )
}

#[test]
fn zero_total_gives_zero_scores() {
    for precision in [0, 2, 4] {
        let calculator = Calculator::new(precision, 0, 0, 0, 0, 0);
        assert_scores(&calculator, 0.0, 0.0, 0.0);
    }
}

#[test]
fn scores_are_idempotent() {
    let calculator = Calculator::new(2, 7, 2, 2, 1, 14);
    let first = (
        calculator.mutation_score_indicator(),
        calculator.coverage_rate(),
        calculator.covered_code_mutation_score_indicator(),
    );
    let second = (
        calculator.mutation_score_indicator(),
        calculator.coverage_rate(),
        calculator.covered_code_mutation_score_indicator(),
    );
    assert_eq!(first.0.to_bits(), second.0.to_bits());
    assert_eq!(first.1.to_bits(), second.1.to_bits());
    assert_eq!(first.2.to_bits(), second.2.to_bits());
}

#[test]
fn one_killed_nine_escaped() {
    let calculator = Calculator::new(2, 1, 0, 0, 0, 10);
    assert_scores(&calculator, 10.0, 100.0, 10.0);
}

#[test]
fn nominal_counts_at_precision_two() {
    let calculator = Calculator::new(2, 7, 2, 2, 1, 14);
    assert_scores(&calculator, 78.57, 92.86, 84.62);
}

#[test]
fn nominal_counts_at_precision_four() {
    let calculator = Calculator::new(4, 7, 2, 2, 1, 14);
    assert_scores(&calculator, 78.5714, 92.8571, 84.6154);
}

#[test]
fn fully_covered_counts() {
    let calculator = Calculator::new(2, 7, 2, 2, 0, 13);
    assert_scores(&calculator, 84.62, 100.0, 84.62);
}

#[test]
fn from_metrics_excludes_skipped() {
    let metrics = MetricsCalculator::new(2);
    for status in DetectionStatus::iter() {
        metrics.collect(&[result(status), result(status)]);
    }

    assert_eq!(metrics.total_mutants_count(), 14);
    assert_eq!(metrics.skipped_count(), 2);
    assert_eq!(metrics.syntax_error_count(), 2);

    let calculator = Calculator::from_metrics(&metrics);
    assert_eq!(calculator.total_mutants_count(), 12);
    assert_eq!(calculator.detected_count(), 6);
    assert_eq!(calculator.not_tested_count(), 2);
    assert_scores(&calculator, 50.0, 83.33, 60.0);
}

#[test]
fn snapshot_is_not_affected_by_later_results() {
    let metrics = MetricsCalculator::new(2);
    metrics.collect(&[result(DetectionStatus::Killed), result(DetectionStatus::Escaped)]);
    let snapshot = Calculator::from_metrics(&metrics);

    metrics.collect(&[result(DetectionStatus::Escaped), result(DetectionStatus::Escaped)]);

    assert_eq!(snapshot.mutation_score_indicator(), 50.0);
    assert_eq!(snapshot.total_mutants_count(), 2);
    assert_eq!(
        Calculator::from_metrics(&metrics).mutation_score_indicator(),
        25.0
    );
}
