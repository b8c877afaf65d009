use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use log::{error, info, warn};
use serde_json::json;
use strum::IntoEnumIterator;

use crate::core::events::{
    ChannelDispatcher, CollectingSubscriber, Event, EventBus, EventDispatcher, RunOutcome,
};
use crate::core::metrics::{Calculator, MetricsCalculator, MinMsiChecker, StatusCounts};
use crate::core::signal::DispatchSignalSubscriber;
use crate::types::config::MetricsConfig;
use crate::types::{AppResult, DetectionStatus, MetricsError, MutantExecutionResult};

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    Passed,
    ThresholdFailed(MetricsError),
    Interrupted,
}

#[derive(Debug)]
pub struct ScoreSummary {
    pub outcome: ScoreOutcome,
    pub counts: StatusCounts,
    pub calculator: Calculator,
}

/// Read a JSON array of results from a file, or from stdin when the path is `-`
pub fn read_results(path: &Path) -> AppResult<Vec<MutantExecutionResult>> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&contents)?)
}

fn spawn_producer(
    results: Vec<MutantExecutionResult>,
    dispatcher: ChannelDispatcher,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        dispatcher.dispatch(Event::MutationTestingStarted {
            mutant_count: results.len(),
        });
        for result in results {
            dispatcher.dispatch(Event::MutantProcessFinished(Arc::new(result)));
            // Let the control loop observe a cancellation between results
            tokio::task::yield_now().await;
        }
        dispatcher.dispatch(Event::MutationTestingFinished);
    })
}

/// Feed results through the event bus into a metrics calculator, then check thresholds
pub async fn score_results(
    results: Vec<MutantExecutionResult>,
    metrics_config: &MetricsConfig,
    signals: Option<Arc<DispatchSignalSubscriber>>,
) -> ScoreSummary {
    let metrics = Arc::new(MetricsCalculator::new(metrics_config.precision()));
    let (mut bus, dispatcher) = EventBus::new();
    bus.subscribe(Arc::new(CollectingSubscriber::new(Arc::clone(&metrics))));
    if let Some(signals) = signals {
        signals.subscribe(Arc::new(dispatcher.clone()));
        bus.subscribe(signals);
    }

    let producer = spawn_producer(results, dispatcher);
    let run_outcome = bus.run_until_cancelled().await;
    if run_outcome == RunOutcome::Cancelled {
        producer.abort();
    }

    let calculator = Calculator::from_metrics(&metrics);
    let outcome = if run_outcome == RunOutcome::Cancelled {
        ScoreOutcome::Interrupted
    } else {
        let checker = MinMsiChecker::new(
            metrics_config.ignore_msi_with_no_mutations(),
            metrics_config.min_msi(),
            metrics_config.min_covered_msi(),
        );
        match checker.check(&calculator) {
            Ok(()) => {
                for hint in checker.suggestions(&calculator) {
                    info!("{hint}");
                }
                ScoreOutcome::Passed
            }
            Err(e) => ScoreOutcome::ThresholdFailed(e),
        }
    };

    ScoreSummary {
        outcome,
        counts: metrics.counts(),
        calculator,
    }
}

fn report(summary: &ScoreSummary, format: &str) -> AppResult<()> {
    let calculator = &summary.calculator;
    let precision = calculator.rounding_precision() as usize;

    if format == "json" {
        let counts: serde_json::Map<String, serde_json::Value> = DetectionStatus::iter()
            .map(|status| (status.to_string(), json!(summary.counts.get(status))))
            .collect();
        let body = json!({
            "counts": counts,
            "total": calculator.total_mutants_count(),
            "msi": calculator.mutation_score_indicator(),
            "coverage_rate": calculator.coverage_rate(),
            "covered_msi": calculator.covered_code_mutation_score_indicator(),
            "interrupted": summary.outcome == ScoreOutcome::Interrupted,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    info!("{} mutations were generated:", summary.counts.total());
    for status in DetectionStatus::iter() {
        info!(
            "  {:>6} {}",
            summary.counts.get(status),
            status.display()
        );
    }
    info!("");
    info!("Metrics:");
    info!(
        "  Mutation Score Indicator (MSI): {:.precision$}%",
        calculator.mutation_score_indicator()
    );
    info!(
        "  Mutation Code Coverage: {:.precision$}%",
        calculator.coverage_rate()
    );
    info!(
        "  Covered Code MSI: {:.precision$}%",
        calculator.covered_code_mutation_score_indicator()
    );
    Ok(())
}

pub async fn execute_score(
    path: &Path,
    metrics_config: MetricsConfig,
    format: &str,
    signals: Option<Arc<DispatchSignalSubscriber>>,
) -> AppResult<ScoreOutcome> {
    let results = read_results(path)?;
    info!(
        "Scoring {} mutant execution results from {}",
        results.len(),
        path.display()
    );

    let summary = score_results(results, &metrics_config, signals).await;
    report(&summary, format)?;

    match &summary.outcome {
        ScoreOutcome::Interrupted => {
            warn!("Scoring was interrupted; metrics cover only the results collected so far")
        }
        ScoreOutcome::ThresholdFailed(e) => error!("{e}"),
        ScoreOutcome::Passed => {}
    }
    Ok(summary.outcome)
}
