//! Monitor service, the hexagonal core.
//!
//! [`MonitorService`] owns the heartbeat clock and the alert aggregator (and
//! through it the flame detector).  Every loop iteration it makes sure the
//! broker session is up, then waits for the heartbeat; on each fire it runs
//! one sample → evaluate → notify cycle:
//!
//! ```text
//!  SensorPort ──▶ ┌─────────────────────────┐ ──▶ TransportPort
//!                 │     MonitorService       │      1. telemetry
//!                 │ Heartbeat · Aggregator   │      2. alerts…
//!   AlarmPort ◀── └─────────────────────────┘ ──▶ EventSink
//!      3. flame OR general pattern
//! ```
//!
//! Everything runs on the caller's thread.  The buzzer pattern blocks
//! inline, so no heartbeat is processed while it sounds.

use embedded_hal::delay::DelayNs;
use log::{error, info, warn};

use crate::config::{AlarmPattern, MonitorConfig};
use crate::monitor::{AlertAggregator, CycleAlerts, FlameEvent, SampleSet};
use crate::scheduler::HeartbeatClock;
use crate::telemetry;

use super::connect::{RetryPolicy, ensure_connected};
use super::events::{AlarmKind, AppEvent};
use super::ports::{AlarmPort, ClockPort, EventSink, SensorPort, TransportPort};

// ───────────────────────────────────────────────────────────────
// CycleReport
// ───────────────────────────────────────────────────────────────

/// What one FIRE phase did.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub sample: SampleSet,
    pub alerts: CycleAlerts,
    /// Buzzer pattern driven this cycle, if any.
    pub alarm: Option<AlarmKind>,
    /// Bodies handed to the transport (telemetry + alerts).
    pub published: u32,
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// Orchestrates the sample-evaluate-notify cycle.
pub struct MonitorService {
    config: MonitorConfig,
    aggregator: AlertAggregator,
    heartbeat: HeartbeatClock,
    retry: RetryPolicy,
    cycles: u64,
}

impl MonitorService {
    /// Build the service; the first heartbeat interval starts at `now_ms`.
    pub fn new(config: MonitorConfig, now_ms: u64) -> Self {
        let aggregator = AlertAggregator::new(&config.thresholds);
        let heartbeat = HeartbeatClock::new(config.heartbeat_interval_ms, now_ms);
        let retry = RetryPolicy::unbounded(config.reconnect_backoff_ms);
        Self {
            config,
            aggregator,
            heartbeat,
            retry,
            cycles: 0,
        }
    }

    /// Replace the reconnect policy (tests use a bounded one).
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            heartbeat_ms: self.config.heartbeat_interval_ms,
        });
        info!(
            "MonitorService started (heartbeat {} ms)",
            self.config.heartbeat_interval_ms
        );
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// One main-loop iteration: reconnect if needed, then WAIT or FIRE.
    ///
    /// Returns the report when the heartbeat fired.  With the default
    /// unbounded retry policy this blocks until the broker is reachable;
    /// the clock is read after reconnecting so the heartbeat and the sample
    /// timestamp see the time the cycle actually runs.
    pub fn tick(
        &mut self,
        clock: &impl ClockPort,
        hw: &mut (impl SensorPort + AlarmPort),
        link: &mut impl TransportPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> Option<CycleReport> {
        if let Err(e) = ensure_connected(link, &self.retry, delay, sink) {
            warn!("MonitorService: broker not reachable ({}), skipping tick", e);
            return None;
        }
        let now_ms = clock.now_ms();
        if !self.heartbeat.poll(now_ms) {
            return None;
        }
        Some(self.fire(now_ms, hw, link, sink))
    }

    /// Run one FIRE phase unconditionally.
    ///
    /// Ordering: telemetry publish, then each alert publish, then the alarm.
    pub fn fire(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + AlarmPort),
        link: &mut impl TransportPort,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycles += 1;

        // 1. Sample
        let sample = hw.read_sample(now_ms);

        // 2. Evaluate
        let outcome = self.aggregator.aggregate(&sample);

        // 3. Telemetry, unconditionally
        let mut published = 0;
        match telemetry::encode_sample(&sample) {
            Ok(body) => {
                link.publish(&self.config.telemetry_topic, body.as_bytes());
                published += 1;
                sink.emit(&AppEvent::Telemetry(sample));
            }
            Err(e) => error!("MonitorService: telemetry encode failed: {}", e),
        }

        // 4. One notification per alert, in channel order
        for alert in &outcome.alerts {
            match telemetry::encode_alert(alert) {
                Ok(body) => {
                    link.publish(&self.config.notification_topic, body.as_bytes());
                    published += 1;
                    sink.emit(&AppEvent::AlertRaised(alert.clone()));
                }
                Err(e) => error!("MonitorService: {} alert encode failed: {}", alert.channel, e),
            }
        }

        if outcome.flame_event == Some(FlameEvent::Cleared) {
            info!("MonitorService: flame cleared");
            sink.emit(&AppEvent::FlameCleared);
        }

        // 5. Alarm: flame pattern OR general pattern, never both
        let alarm = if outcome.flame_rising() {
            Some(AlarmKind::Flame)
        } else if outcome.any_alert {
            Some(AlarmKind::General)
        } else {
            None
        };
        if let Some(kind) = alarm {
            let pattern = self.pattern(kind);
            info!(
                "MonitorService: {:?} alarm, blocking {} ms",
                kind,
                pattern.duration_ms()
            );
            hw.pulse(pattern.count, pattern.on_ms, pattern.off_ms);
            sink.emit(&AppEvent::AlarmDriven(kind));
        }

        CycleReport {
            sample,
            alerts: outcome,
            alarm,
            published,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn pattern(&self, kind: AlarmKind) -> AlarmPattern {
        match kind {
            AlarmKind::General => self.config.general_alarm,
            AlarmKind::Flame => self.config.flame_alarm,
        }
    }

    /// FIRE phases executed since startup.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Whether the flame detector is latched.
    pub fn flame_latched(&self) -> bool {
        self.aggregator.flame_detector().previously_detected()
    }

    /// Milliseconds until the next heartbeat.
    pub fn next_fire_in_ms(&self, now_ms: u64) -> u64 {
        self.heartbeat.remaining_ms(now_ms)
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
