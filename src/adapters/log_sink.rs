//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every application event as one
//! line on the serial console (UART in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::monitor::Severity;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn opt(v: Option<f32>) -> heapless::String<12> {
    use core::fmt::Write;
    let mut s = heapless::String::new();
    let _ = match v {
        Some(v) if !v.is_nan() => write!(s, "{:.1}", v),
        _ => write!(s, "--"),
    };
    s
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { heartbeat_ms } => {
                info!("START | heartbeat={}ms", heartbeat_ms);
            }
            AppEvent::Telemetry(s) => {
                info!(
                    "TELEM | T={}\u{00b0}C H={}% | gas={} vib={} sound={} | flame={} | t={}ms",
                    opt(s.temperature),
                    opt(s.humidity),
                    s.gas,
                    s.vibration,
                    s.sound,
                    u8::from(s.flame),
                    s.timestamp_ms,
                );
            }
            AppEvent::AlertRaised(a) => match a.severity {
                Severity::Critical => warn!("ALERT | {} {} | {}", a.severity.as_str(), a.channel, a.message),
                Severity::Warning => info!("ALERT | {} {} | {}", a.severity.as_str(), a.channel, a.message),
            },
            AppEvent::FlameCleared => {
                info!("FLAME | cleared");
            }
            AppEvent::AlarmDriven(kind) => {
                info!("ALARM | {:?} pattern", kind);
            }
            AppEvent::TransportRetry { attempt, backoff_ms } => {
                warn!("LINK  | attempt {} failed, retry in {}ms", attempt, backoff_ms);
            }
            AppEvent::TransportConnected { attempts } => {
                info!("LINK  | connected after {} attempt(s)", attempts);
            }
        }
    }
}
