use std::sync::Arc;
use std::thread;

use mewt_php::core::events::{
    CollectingSubscriber, Event, EventBus, EventDispatcher, RunOutcome,
};
use mewt_php::metrics::{Collector, MetricsCalculator, ResultsCollector};
use mewt_php::types::{DetectionStatus, MutantExecutionResult};

fn result(status: DetectionStatus, line: u32) -> Arc<MutantExecutionResult> {
    Arc::new(
        MutantExecutionResult::new(
            "vendor/bin/phpunit",
            "",
            status,
            "",
            "AssignCoalesce",
            "src/Foo.php",
            line,
            "??=",
            "=",
        )
        .unwrap(),
    )
}

const STATUSES: [DetectionStatus; 4] = [
    DetectionStatus::Killed,
    DetectionStatus::Escaped,
    DetectionStatus::TimedOut,
    DetectionStatus::NotCovered,
];

#[test]
fn concurrent_producers_lose_nothing() {
    let metrics = Arc::new(MetricsCalculator::new(2));
    let producers = 8;
    let batches = 50;

    let handles: Vec<_> = (0..producers)
        .map(|worker| {
            let metrics = Arc::clone(&metrics);
            thread::spawn(move || {
                for batch in 0..batches {
                    let status = STATUSES[(worker + batch) % STATUSES.len()];
                    let line = (worker * batches + batch + 1) as u32;
                    metrics.collect(&[result(status, line), result(status, line)]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let expected_total = producers * batches * 2;
    assert_eq!(metrics.total_mutants_count(), expected_total);
    assert_eq!(metrics.results().total(), expected_total);

    let per_status = expected_total / STATUSES.len();
    for status in STATUSES {
        assert_eq!(metrics.counts().get(status), per_status, "{status}");
        assert_eq!(metrics.results().count(status), per_status, "{status}");
    }

    let calculator = metrics.calculator();
    assert_eq!(calculator.mutation_score_indicator(), 50.0);
    assert_eq!(calculator.coverage_rate(), 75.0);
    assert_eq!(calculator.covered_code_mutation_score_indicator(), 66.67);
}

#[test]
fn snapshots_are_detached_from_the_collector() {
    let collector = ResultsCollector::new();
    collector.collect(&[result(DetectionStatus::Killed, 1)]);
    let snapshot = collector.results(DetectionStatus::Killed);

    collector.collect(&[result(DetectionStatus::Killed, 2)]);

    assert_eq!(snapshot.len(), 1);
    assert_eq!(collector.results(DetectionStatus::Killed).len(), 2);
}

#[test]
fn unknown_statuses_are_empty() {
    let collector = ResultsCollector::new();
    assert!(collector.results(DetectionStatus::SyntaxError).is_empty());
    assert_eq!(collector.count(DetectionStatus::Skipped), 0);
    assert!(collector.all_results().is_empty());
}

#[test]
fn invalid_results_never_reach_a_collector() {
    let err = MutantExecutionResult::new(
        "vendor/bin/phpunit",
        "",
        DetectionStatus::Killed,
        "",
        "",
        "src/Foo.php",
        1,
        "",
        "",
    );
    assert!(err.is_err());

    let err = MutantExecutionResult::new(
        "vendor/bin/phpunit",
        "",
        DetectionStatus::Killed,
        "",
        "NewObject",
        "src/Foo.php",
        0,
        "",
        "",
    );
    assert!(err.is_err());
}

#[test]
fn results_arrive_through_the_event_bus() {
    let metrics = Arc::new(MetricsCalculator::new(2));
    let (mut bus, dispatcher) = EventBus::new();
    bus.subscribe(Arc::new(CollectingSubscriber::new(Arc::clone(&metrics))));

    let producers: Vec<_> = (0..4u32)
        .map(|worker| {
            let dispatcher = dispatcher.clone();
            thread::spawn(move || {
                for line in 1..=10 {
                    let status = STATUSES[worker as usize];
                    dispatcher.dispatch(Event::MutantProcessFinished(result(status, line)));
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }
    dispatcher.dispatch(Event::MutationTestingFinished);

    let outcome = tokio_test::block_on(bus.run_until_cancelled());
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(metrics.total_mutants_count(), 40);
    assert_eq!(metrics.not_tested_count(), 10);
}
