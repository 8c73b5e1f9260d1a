//! Broker connection retry policy.
//!
//! The monitor cannot publish without a broker session, so every heartbeat
//! first calls [`ensure_connected`].  While the link is down the whole
//! cycle blocks here, retrying with a fixed backoff.  Production runs an
//! unbounded policy; tests and bench tools pass a bounded one.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use super::events::AppEvent;
use super::ports::{EventSink, TransportError, TransportPort};

/// How [`ensure_connected`] retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed delay between attempts.
    pub backoff_ms: u32,
    /// `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub const fn unbounded(backoff_ms: u32) -> Self {
        Self {
            backoff_ms,
            max_attempts: None,
        }
    }

    pub const fn bounded(backoff_ms: u32, max_attempts: u32) -> Self {
        Self {
            backoff_ms,
            max_attempts: Some(max_attempts),
        }
    }
}

/// Block until the transport reports a live session.
///
/// Returns the number of connection attempts made (`0` if it was already
/// connected).  Only a bounded policy can return an error.
pub fn ensure_connected(
    transport: &mut impl TransportPort,
    policy: &RetryPolicy,
    delay: &mut impl DelayNs,
    sink: &mut impl EventSink,
) -> Result<u32, TransportError> {
    if transport.is_connected() {
        return Ok(0);
    }

    let mut attempt: u32 = 0;
    loop {
        attempt = attempt.saturating_add(1);
        info!("transport: connection attempt {}", attempt);

        match transport.try_connect() {
            Ok(()) => {
                info!("transport: connected after {} attempt(s)", attempt);
                sink.emit(&AppEvent::TransportConnected { attempts: attempt });
                return Ok(attempt);
            }
            Err(e) => {
                if policy.max_attempts.is_some_and(|max| attempt >= max) {
                    warn!("transport: attempt {} failed ({}), giving up", attempt, e);
                    return Err(TransportError::RetriesExhausted { attempts: attempt });
                }
                warn!(
                    "transport: attempt {} failed ({}), retrying in {} ms",
                    attempt, e, policy.backoff_ms
                );
                sink.emit(&AppEvent::TransportRetry {
                    attempt,
                    backoff_ms: policy.backoff_ms,
                });
                delay.delay_ms(policy.backoff_ms);
            }
        }
    }
}
