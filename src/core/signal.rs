use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use log::{debug, warn};

use crate::core::events::{Event, EventDispatcher, EventSubscriber};
use crate::core::output::OutputSink;
use crate::types::SignalError;

/// Only one live subscriber may own the process-wide handler
static REGISTERED: AtomicBool = AtomicBool::new(false);

const CANCEL_NOTICE: &str =
    "Received a termination signal. Stopping mutation testing once in-flight mutants settle...";
const REPEAT_NOTICE: &str = "Termination signal received again; cancellation is already underway.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    /// Waiting for the first signal of the run
    Armed,
    /// A signal arrived but no dispatcher was bound to forward it
    Notified,
    /// Cancellation has been published; further signals only print a notice
    Delegated,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DispatchSignalSubscriberFactory;

impl DispatchSignalSubscriberFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn create(&self, output: Arc<dyn OutputSink>) -> Arc<DispatchSignalSubscriber> {
        Arc::new(DispatchSignalSubscriber::new(output))
    }
}

/// Turns OS interrupt/termination signals into a single `CancellationRequested` event
pub struct DispatchSignalSubscriber {
    output: Arc<dyn OutputSink>,
    dispatcher: Mutex<Option<Arc<dyn EventDispatcher>>>,
    state: Mutex<SignalState>,
    received: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DispatchSignalSubscriber {
    fn new(output: Arc<dyn OutputSink>) -> Self {
        Self {
            output,
            dispatcher: Mutex::new(None),
            state: Mutex::new(SignalState::Armed),
            received: AtomicUsize::new(0),
        }
    }

    /// Bind the dispatcher cancellation events are published to.
    ///
    /// A signal that arrived while unbound is published here.
    pub fn subscribe(&self, dispatcher: Arc<dyn EventDispatcher>) {
        let mut state = lock(&self.state);
        if *state == SignalState::Notified {
            debug!("Publishing cancellation requested before the dispatcher was bound");
            dispatcher.dispatch(Event::CancellationRequested);
            *state = SignalState::Delegated;
        }
        *lock(&self.dispatcher) = Some(dispatcher);
    }

    /// Install the SIGINT/SIGTERM/SIGHUP handler for this process.
    ///
    /// The handler itself only forwards a unit value over a channel; a
    /// dedicated listener thread receives it and calls `on_signal`.
    pub fn register(self: &Arc<Self>) -> Result<(), SignalError> {
        self.register_with(|handler| ctrlc::set_handler(handler))
    }

    fn register_with<I>(self: &Arc<Self>, install: I) -> Result<(), SignalError>
    where
        I: FnOnce(Box<dyn FnMut() + Send>) -> Result<(), ctrlc::Error>,
    {
        if REGISTERED.swap(true, Ordering::SeqCst) {
            return Err(SignalError::AlreadyRegistered);
        }

        let (tx, rx) = mpsc::channel::<()>();
        let subscriber = Arc::clone(self);
        thread::Builder::new()
            .name("signal-listener".to_string())
            .spawn(move || {
                for () in rx {
                    subscriber.on_signal();
                }
                debug!("Signal listener stopped");
            })
            .map_err(|e| {
                REGISTERED.store(false, Ordering::SeqCst);
                SignalError::Handler(e.to_string())
            })?;

        install(Box::new(move || {
            let _ = tx.send(());
        }))
        .map_err(|e| match e {
            ctrlc::Error::MultipleHandlers => SignalError::AlreadyRegistered,
            other => {
                REGISTERED.store(false, Ordering::SeqCst);
                SignalError::Handler(other.to_string())
            }
        })?;

        debug!("Signal handler registered");
        Ok(())
    }

    /// Handle one received signal: always print a notice, publish at most once per arm
    pub fn on_signal(&self) {
        self.received.fetch_add(1, Ordering::SeqCst);
        let mut state = lock(&self.state);

        if *state == SignalState::Delegated {
            self.output.warning(REPEAT_NOTICE);
            return;
        }

        self.output.warning(CANCEL_NOTICE);
        match lock(&self.dispatcher).as_ref() {
            Some(dispatcher) => {
                dispatcher.dispatch(Event::CancellationRequested);
                *state = SignalState::Delegated;
            }
            None => {
                warn!("No event dispatcher bound yet; cancellation will be published once one is");
                *state = SignalState::Notified;
            }
        }
    }

    /// Allow the next signal to publish a fresh cancellation.
    /// A pending unpublished cancellation is kept.
    pub fn rearm(&self) {
        let mut state = lock(&self.state);
        if *state == SignalState::Delegated {
            *state = SignalState::Armed;
        }
    }

    pub fn state(&self) -> SignalState {
        *lock(&self.state)
    }

    pub fn signals_received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }
}

impl EventSubscriber for DispatchSignalSubscriber {
    fn name(&self) -> &'static str {
        "DispatchSignalSubscriber"
    }

    fn on_event(&self, event: &Event) {
        if let Event::MutationTestingStarted { .. } = event {
            self.rearm();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::output::BufferedOutput;

    #[derive(Default)]
    struct RecordingDispatcher {
        cancellations: AtomicUsize,
    }

    impl EventDispatcher for RecordingDispatcher {
        fn dispatch(&self, event: Event) {
            if let Event::CancellationRequested = event {
                self.cancellations.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn setup() -> (
        Arc<BufferedOutput>,
        Arc<RecordingDispatcher>,
        Arc<DispatchSignalSubscriber>,
    ) {
        let output = Arc::new(BufferedOutput::new());
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let subscriber = DispatchSignalSubscriberFactory::new().create(output.clone());
        subscriber.subscribe(dispatcher.clone());
        (output, dispatcher, subscriber)
    }

    #[test]
    fn factory_creates_an_armed_event_subscriber() {
        let output = Arc::new(BufferedOutput::new());
        let subscriber: Arc<dyn EventSubscriber> =
            DispatchSignalSubscriberFactory::new().create(output);
        assert_eq!(subscriber.name(), "DispatchSignalSubscriber");
    }

    #[test]
    fn notice_per_signal_single_dispatch() {
        let (output, dispatcher, subscriber) = setup();
        assert_eq!(subscriber.state(), SignalState::Armed);

        subscriber.on_signal();
        subscriber.on_signal();
        subscriber.on_signal();

        assert_eq!(subscriber.signals_received(), 3);
        assert_eq!(output.lines().len(), 3);
        assert_eq!(dispatcher.cancellations.load(Ordering::SeqCst), 1);
        assert_eq!(subscriber.state(), SignalState::Delegated);
    }

    #[test]
    fn rearming_allows_another_cancellation() {
        let (_output, dispatcher, subscriber) = setup();
        subscriber.on_signal();
        subscriber.on_event(&Event::MutationTestingStarted { mutant_count: 3 });
        assert_eq!(subscriber.state(), SignalState::Armed);
        subscriber.on_signal();
        assert_eq!(dispatcher.cancellations.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unbound_subscriber_waits_for_a_dispatcher() {
        let output = Arc::new(BufferedOutput::new());
        let subscriber = DispatchSignalSubscriberFactory::new().create(output.clone());
        subscriber.on_signal();
        assert_eq!(subscriber.state(), SignalState::Notified);

        let dispatcher = Arc::new(RecordingDispatcher::default());
        subscriber.subscribe(dispatcher.clone());
        assert_eq!(subscriber.state(), SignalState::Delegated);
        assert_eq!(dispatcher.cancellations.load(Ordering::SeqCst), 1);

        subscriber.on_signal();
        assert_eq!(dispatcher.cancellations.load(Ordering::SeqCst), 1);
        assert_eq!(output.lines().len(), 2);
    }

    #[test]
    fn run_start_keeps_a_pending_cancellation() {
        let output = Arc::new(BufferedOutput::new());
        let subscriber = DispatchSignalSubscriberFactory::new().create(output.clone());
        subscriber.on_signal();
        subscriber.on_event(&Event::MutationTestingStarted { mutant_count: 5 });
        assert_eq!(subscriber.state(), SignalState::Notified);

        let dispatcher = Arc::new(RecordingDispatcher::default());
        subscriber.subscribe(dispatcher.clone());
        assert_eq!(dispatcher.cancellations.load(Ordering::SeqCst), 1);
        assert_eq!(subscriber.state(), SignalState::Delegated);
        assert_eq!(output.lines().len(), 1);
    }

    // The only test in this binary that touches the process-wide guard
    #[test]
    fn failed_install_allows_a_retry() {
        let subscriber =
            DispatchSignalSubscriberFactory::new().create(Arc::new(BufferedOutput::new()));
        let failed = subscriber.register_with(|_| {
            Err(ctrlc::Error::System(std::io::Error::other("sigaction failed")))
        });
        assert!(matches!(failed, Err(SignalError::Handler(_))));

        assert_eq!(subscriber.register_with(|_| Ok(())), Ok(()));
        assert_eq!(
            subscriber.register_with(|_| Ok(())),
            Err(SignalError::AlreadyRegistered)
        );
    }
}
