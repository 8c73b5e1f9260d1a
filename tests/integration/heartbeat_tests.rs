//! WAIT / FIRE scheduling through `MonitorService::tick`.

use dcmon::app::ports::ClockPort;
use dcmon::app::service::MonitorService;
use dcmon::config::{MonitorConfig, TELEMETRY_TOPIC};
use dcmon::monitor::SampleSet;

use super::mock_hw::{
    LogSink, MockBroker, MockClock, MockDelay, MockHardware, calm, journal, published,
};

fn service() -> MonitorService {
    MonitorService::new(MonitorConfig::default(), 0)
}

#[test]
fn one_telemetry_publish_per_interval() {
    let j = journal();
    let mut hw = MockHardware::new(&j, []);
    let mut broker = MockBroker::connected(&j);
    let mut sink = LogSink::new();
    let mut svc = service();

    let clock = MockClock::default();
    let mut fires = 0;
    for now in (0..=300_000).step_by(100) {
        clock.set(now);
        if svc
            .tick(&clock, &mut hw, &mut broker, &mut MockDelay::default(), &mut sink)
            .is_some()
        {
            fires += 1;
        }
    }

    assert_eq!(fires, 5);
    assert_eq!(published(&j, TELEMETRY_TOPIC).len(), 5);
    assert_eq!(hw.reads, 5);
}

#[test]
fn stalled_loop_gets_single_catch_up_fire() {
    let j = journal();
    let mut hw = MockHardware::new(&j, []);
    let mut broker = MockBroker::connected(&j);
    let mut sink = LogSink::new();
    let mut delay = MockDelay::default();
    let mut svc = service();

    assert!(svc.tick(&MockClock::at(60_000), &mut hw, &mut broker, &mut delay, &mut sink).is_some());
    // Loop stalled for more than three intervals.
    assert!(svc.tick(&MockClock::at(250_000), &mut hw, &mut broker, &mut delay, &mut sink).is_some());
    assert!(svc.tick(&MockClock::at(250_001), &mut hw, &mut broker, &mut delay, &mut sink).is_none());
    assert!(svc.tick(&MockClock::at(309_999), &mut hw, &mut broker, &mut delay, &mut sink).is_none());
    assert!(svc.tick(&MockClock::at(310_000), &mut hw, &mut broker, &mut delay, &mut sink).is_some());
    assert_eq!(svc.cycles(), 3);
}

/// The alarm blocks the loop; the next heartbeat is still measured from
/// the previous fire, so a long pattern eats into the WAIT phase.
#[test]
fn blocking_alarm_delays_nothing_but_the_loop() {
    let j = journal();
    let hot = SampleSet {
        temperature: Some(45.0),
        ..calm()
    };
    let mut hw = MockHardware::new(&j, [hot]);
    let mut broker = MockBroker::connected(&j);
    let mut sink = LogSink::new();
    let mut delay = MockDelay::default();
    let mut svc = service();

    let fired_at = 60_000;
    assert!(svc.tick(&MockClock::at(fired_at), &mut hw, &mut broker, &mut delay, &mut sink).is_some());
    let alarm_ms = u64::from(MonitorConfig::default().general_alarm.duration_ms());

    // First poll after the alarm returns.
    let resumed = fired_at + alarm_ms;
    assert!(svc.tick(&MockClock::at(resumed), &mut hw, &mut broker, &mut delay, &mut sink).is_none());
    assert_eq!(svc.next_fire_in_ms(resumed), 60_000 - alarm_ms);
}

#[test]
fn reconnects_before_firing() {
    let j = journal();
    let mut hw = MockHardware::new(&j, []);
    let mut broker = MockBroker::refusing(&j, 2);
    let mut sink = LogSink::new();
    let mut delay = MockDelay::default();
    let mut svc = service();

    let report = svc.tick(&MockClock::at(60_000), &mut hw, &mut broker, &mut delay, &mut sink);

    assert!(report.is_some());
    assert_eq!(broker.connect_attempts, 3);
    assert_eq!(delay.total_ms(), 2 * 5_000);
    assert_eq!(published(&j, TELEMETRY_TOPIC).len(), 1);
}

/// Time spent in backoff counts: a reconnect that runs past the heartbeat
/// deadline fires the cycle, stamped with the post-reconnect time.
#[test]
fn heartbeat_sees_time_spent_reconnecting() {
    let j = journal();
    let mut hw = MockHardware::new(&j, []);
    let mut broker = MockBroker::refusing(&j, 2);
    let mut sink = LogSink::new();
    let clock = MockClock::at(55_000);
    let mut delay = MockDelay::driving(&clock);
    let mut svc = service();

    let report = svc
        .tick(&clock, &mut hw, &mut broker, &mut delay, &mut sink)
        .expect("deadline passed while reconnecting");

    assert_eq!(clock.now_ms(), 65_000);
    assert_eq!(report.sample.timestamp_ms, 65_000);
    assert_eq!(svc.next_fire_in_ms(65_000), 60_000);
}
