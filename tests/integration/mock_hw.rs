//! Mock adapters for integration tests.
//!
//! Every port call lands in one shared [`Journal`] so tests can assert on
//! the cross-adapter ordering (telemetry → alerts → alarm) without
//! touching real GPIO or a broker.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use dcmon::app::events::AppEvent;
use dcmon::app::ports::{
    AlarmPort, ClockPort, EventSink, SensorPort, TransportError, TransportPort,
};
use dcmon::monitor::SampleSet;
use embedded_hal::delay::DelayNs;

// ── Journal ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Publish { topic: String, body: String },
    Pulse { count: u8, on_ms: u32, off_ms: u32 },
}

pub type Journal = Rc<RefCell<Vec<Op>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

#[allow(dead_code)]
pub fn published(journal: &Journal, topic: &str) -> Vec<serde_json::Value> {
    journal
        .borrow()
        .iter()
        .filter_map(|op| match op {
            Op::Publish { topic: t, body } if t == topic => {
                Some(serde_json::from_str(body).expect("body is JSON"))
            }
            _ => None,
        })
        .collect()
}

#[allow(dead_code)]
pub fn pulses(journal: &Journal) -> Vec<(u8, u32, u32)> {
    journal
        .borrow()
        .iter()
        .filter_map(|op| match op {
            Op::Pulse { count, on_ms, off_ms } => Some((*count, *on_ms, *off_ms)),
            Op::Publish { .. } => None,
        })
        .collect()
}

// ── MockHardware ──────────────────────────────────────────────

/// Serves queued samples (repeating the last one) and records pulses.
pub struct MockHardware {
    queue: VecDeque<SampleSet>,
    last: SampleSet,
    journal: Journal,
    pub reads: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(journal: &Journal, samples: impl IntoIterator<Item = SampleSet>) -> Self {
        Self {
            queue: samples.into_iter().collect(),
            last: calm(),
            journal: Rc::clone(journal),
            reads: 0,
        }
    }

    pub fn push(&mut self, sample: SampleSet) {
        self.queue.push_back(sample);
    }
}

impl SensorPort for MockHardware {
    fn read_sample(&mut self, now_ms: u64) -> SampleSet {
        self.reads += 1;
        if let Some(next) = self.queue.pop_front() {
            self.last = next;
        }
        SampleSet {
            timestamp_ms: now_ms,
            ..self.last
        }
    }
}

impl AlarmPort for MockHardware {
    fn pulse(&mut self, count: u8, on_ms: u32, off_ms: u32) {
        self.journal.borrow_mut().push(Op::Pulse {
            count,
            on_ms,
            off_ms,
        });
    }
}

// ── MockBroker ────────────────────────────────────────────────

pub struct MockBroker {
    journal: Journal,
    pub connected: bool,
    pub refusals_left: u32,
    pub connect_attempts: u32,
}

#[allow(dead_code)]
impl MockBroker {
    pub fn connected(journal: &Journal) -> Self {
        Self {
            journal: Rc::clone(journal),
            connected: true,
            refusals_left: 0,
            connect_attempts: 0,
        }
    }

    pub fn refusing(journal: &Journal, refusals: u32) -> Self {
        Self {
            connected: false,
            refusals_left: refusals,
            ..Self::connected(journal)
        }
    }
}

impl TransportPort for MockBroker {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn try_connect(&mut self) -> Result<(), TransportError> {
        self.connect_attempts += 1;
        if self.refusals_left > 0 {
            self.refusals_left -= 1;
            return Err(TransportError::BrokerUnreachable);
        }
        self.connected = true;
        Ok(())
    }

    fn publish(&mut self, topic: &str, body: &[u8]) {
        self.journal.borrow_mut().push(Op::Publish {
            topic: topic.to_owned(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
}

// ── MockClock / MockDelay ─────────────────────────────────────

/// Shared millisecond clock; a [`MockDelay`] built with
/// [`MockDelay::driving`] moves it forward.
#[derive(Clone, Default)]
pub struct MockClock(Rc<Cell<u64>>);

#[allow(dead_code)]
impl MockClock {
    pub fn at(ms: u64) -> Self {
        Self(Rc::new(Cell::new(ms)))
    }

    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }
}

impl ClockPort for MockClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
    clock: Option<(MockClock, u64)>,
}

#[allow(dead_code)]
impl MockDelay {
    /// A delay that advances `clock` by the time it sleeps.
    pub fn driving(clock: &MockClock) -> Self {
        Self {
            total_ns: 0,
            clock: Some((clock.clone(), clock.now_ms())),
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        if let Some((clock, start_ms)) = &self.clock {
            clock.set(start_ms + self.total_ns / 1_000_000);
        }
    }
}

// ── LogSink ───────────────────────────────────────────────────

/// Event sink that records every emitted event.
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Sample fixtures ───────────────────────────────────────────

/// Every channel comfortably inside its limit.
pub fn calm() -> SampleSet {
    SampleSet {
        temperature: Some(22.0),
        humidity: Some(45.0),
        gas: 120,
        vibration: 0,
        sound: 300,
        flame: false,
        timestamp_ms: 0,
    }
}
