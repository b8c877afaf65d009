use std::sync::Arc;

use mewt_php::core::output::BufferedOutput;
use mewt_php::core::signal::{DispatchSignalSubscriberFactory, SignalState};
use mewt_php::types::SignalError;

// Registration is process-wide, so every assertion lives in one test
#[test]
fn second_registration_is_rejected() {
    let factory = DispatchSignalSubscriberFactory::new();
    let first = factory.create(Arc::new(BufferedOutput::new()));
    let second = factory.create(Arc::new(BufferedOutput::new()));

    assert_eq!(first.register(), Ok(()));
    assert_eq!(second.register(), Err(SignalError::AlreadyRegistered));
    assert_eq!(first.register(), Err(SignalError::AlreadyRegistered));

    assert_eq!(first.state(), SignalState::Armed);
    assert_eq!(first.signals_received(), 0);
}
