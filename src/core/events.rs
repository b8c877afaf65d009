use std::sync::Arc;

use log::{debug, trace};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::core::metrics::Collector;
use crate::types::MutantExecutionResult;

/// Everything published on the event bus during a mutation testing run
#[derive(Debug, Clone)]
pub enum Event {
    MutationTestingStarted { mutant_count: usize },
    MutantProcessFinished(Arc<MutantExecutionResult>),
    MutationTestingFinished,
    /// Stop requested now. Carries no payload.
    CancellationRequested,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::MutationTestingStarted { .. } => "MutationTestingStarted",
            Event::MutantProcessFinished(_) => "MutantProcessFinished",
            Event::MutationTestingFinished => "MutationTestingFinished",
            Event::CancellationRequested => "CancellationRequested",
        }
    }
}

pub trait EventDispatcher: Send + Sync {
    fn dispatch(&self, event: Event);
}

/// Sending half of the bus; cheap to clone into producers
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    tx: UnboundedSender<Event>,
}

impl EventDispatcher for ChannelDispatcher {
    fn dispatch(&self, event: Event) {
        let name = event.name();
        if self.tx.send(event).is_err() {
            debug!("Event bus already stopped, dropping {name}");
        }
    }
}

pub trait EventSubscriber: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_event(&self, _event: &Event) {}
}

/// Feeds every finished mutant into a collector
pub struct CollectingSubscriber<C: Collector> {
    collector: Arc<C>,
}

impl<C: Collector> CollectingSubscriber<C> {
    pub fn new(collector: Arc<C>) -> Self {
        Self { collector }
    }
}

impl<C: Collector> EventSubscriber for CollectingSubscriber<C> {
    fn name(&self) -> &'static str {
        "CollectingSubscriber"
    }

    fn on_event(&self, event: &Event) {
        if let Event::MutantProcessFinished(result) = event {
            self.collector.collect_one(Arc::clone(result));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

/// Control loop that fans events out to subscribers in arrival order
pub struct EventBus {
    rx: UnboundedReceiver<Event>,
    subscribers: Vec<Arc<dyn EventSubscriber>>,
}

impl EventBus {
    pub fn new() -> (Self, ChannelDispatcher) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                rx,
                subscribers: Vec::new(),
            },
            ChannelDispatcher { tx },
        )
    }

    pub fn subscribe(&mut self, subscriber: Arc<dyn EventSubscriber>) {
        debug!("Subscribing {} to the event bus", subscriber.name());
        self.subscribers.push(subscriber);
    }

    /// Deliver events until the run finishes, a cancellation arrives, or every
    /// dispatcher is dropped. Events queued behind a cancellation are discarded.
    pub async fn run_until_cancelled(mut self) -> RunOutcome {
        while let Some(event) = self.rx.recv().await {
            trace!("Delivering {}", event.name());
            for subscriber in &self.subscribers {
                subscriber.on_event(&event);
            }
            match event {
                Event::MutationTestingFinished => return RunOutcome::Completed,
                Event::CancellationRequested => return RunOutcome::Cancelled,
                _ => {}
            }
        }
        debug!("All event dispatchers dropped");
        RunOutcome::Completed
    }
}
