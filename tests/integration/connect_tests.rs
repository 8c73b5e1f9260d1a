//! `ensure_connected` against a scripted broker and a counting delay.

use dcmon::app::connect::{RetryPolicy, ensure_connected};
use dcmon::app::events::AppEvent;
use dcmon::app::ports::{TransportError, TransportPort};

use super::mock_hw::{LogSink, MockBroker, MockDelay, journal};

#[test]
fn connected_transport_is_left_alone() {
    let j = journal();
    let mut broker = MockBroker::connected(&j);
    let mut delay = MockDelay::default();
    let mut sink = LogSink::new();

    let n = ensure_connected(&mut broker, &RetryPolicy::unbounded(5_000), &mut delay, &mut sink);

    assert_eq!(n, Ok(0));
    assert_eq!(broker.connect_attempts, 0);
    assert_eq!(delay.total_ns, 0);
}

#[test]
fn fixed_backoff_between_attempts() {
    let j = journal();
    let mut broker = MockBroker::refusing(&j, 5);
    let mut delay = MockDelay::default();
    let mut sink = LogSink::new();

    let n = ensure_connected(&mut broker, &RetryPolicy::unbounded(5_000), &mut delay, &mut sink);

    assert_eq!(n, Ok(6));
    assert!(broker.is_connected());
    assert_eq!(delay.total_ms(), 5 * 5_000);
    let attempts: Vec<u32> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::TransportRetry { attempt, backoff_ms } => {
                assert_eq!(*backoff_ms, 5_000);
                Some(*attempt)
            }
            _ => None,
        })
        .collect();
    assert_eq!(attempts, [1, 2, 3, 4, 5]);
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::TransportConnected { attempts: 6 })
    ));
}

#[test]
fn bounded_policy_reports_exhaustion() {
    let j = journal();
    let mut broker = MockBroker::refusing(&j, u32::MAX);
    let mut delay = MockDelay::default();
    let mut sink = LogSink::new();

    let r = ensure_connected(&mut broker, &RetryPolicy::bounded(250, 4), &mut delay, &mut sink);

    assert_eq!(r, Err(TransportError::RetriesExhausted { attempts: 4 }));
    assert_eq!(broker.connect_attempts, 4);
    assert_eq!(delay.total_ms(), 3 * 250);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::TransportConnected { .. })), 0);
}
