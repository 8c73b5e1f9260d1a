//! End-to-end monitor cycles: sample → evaluate → publish → alarm.

use dcmon::app::events::{AlarmKind, AppEvent};
use dcmon::app::service::MonitorService;
use dcmon::config::{MonitorConfig, NOTIFICATION_TOPIC, TELEMETRY_TOPIC};
use dcmon::monitor::{Channel, SampleSet};

use super::mock_hw::{LogSink, MockBroker, MockHardware, Op, calm, journal, published, pulses};

fn general() -> (u8, u32, u32) {
    let p = MonitorConfig::default().general_alarm;
    (p.count, p.on_ms, p.off_ms)
}

fn flame() -> (u8, u32, u32) {
    let p = MonitorConfig::default().flame_alarm;
    (p.count, p.on_ms, p.off_ms)
}

// ── Hot rack: one critical temperature alert ──────────────────

#[test]
fn hot_rack_publishes_one_critical_alert_and_general_alarm() {
    let j = journal();
    let sample = SampleSet {
        temperature: Some(35.2),
        humidity: Some(50.0),
        gas: 100,
        vibration: 0,
        sound: 200,
        flame: false,
        timestamp_ms: 0,
    };
    let mut hw = MockHardware::new(&j, [sample]);
    let mut broker = MockBroker::connected(&j);
    let mut sink = LogSink::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), 0);

    let report = svc.fire(60_000, &mut hw, &mut broker, &mut sink);

    let telem = published(&j, TELEMETRY_TOPIC);
    assert_eq!(telem.len(), 1);
    assert!((telem[0]["temperature"].as_f64().unwrap() - 35.2).abs() < 1e-6);
    assert_eq!(telem[0]["gas"], 100);
    assert_eq!(telem[0]["flame"], 0);

    let alerts = published(&j, NOTIFICATION_TOPIC);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["sensor"], "temperature");
    assert_eq!(alerts[0]["type"], "critical");
    assert_eq!(
        alerts[0]["message"],
        "Critical! Datacenter temperature is 35.2\u{00b0}C."
    );

    assert_eq!(pulses(&j), [general()]);
    assert_eq!(report.alarm, Some(AlarmKind::General));
    assert_eq!(report.published, 2);
}

// ── Flame: true, true, false ──────────────────────────────────

#[test]
fn persistent_flame_alerts_once_and_clears() {
    let j = journal();
    let on = SampleSet { flame: true, ..calm() };
    let off = calm();
    let mut hw = MockHardware::new(&j, [on, on, off]);
    let mut broker = MockBroker::connected(&j);
    let mut sink = LogSink::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), 0);

    for t in 1..=3 {
        svc.fire(t * 60_000, &mut hw, &mut broker, &mut sink);
    }

    let alerts = published(&j, NOTIFICATION_TOPIC);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["sensor"], "flame");
    assert_eq!(alerts[0]["type"], "critical");
    assert_eq!(pulses(&j), [flame()]);

    // Telemetry still went out every cycle.
    let flames: Vec<_> = published(&j, TELEMETRY_TOPIC)
        .iter()
        .map(|b| b["flame"].as_u64().unwrap())
        .collect();
    assert_eq!(flames, [1, 1, 0]);

    assert_eq!(sink.count(|e| matches!(e, AppEvent::FlameCleared)), 1);
    assert!(!svc.flame_latched());
}

// ── Dead DHT22: telemetry only ────────────────────────────────

#[test]
fn invalid_temperature_is_published_as_null_without_alerts() {
    let j = journal();
    let sample = SampleSet {
        temperature: None,
        ..calm()
    };
    let mut hw = MockHardware::new(&j, [sample]);
    let mut broker = MockBroker::connected(&j);
    let mut sink = LogSink::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), 0);

    let report = svc.fire(60_000, &mut hw, &mut broker, &mut sink);

    let telem = published(&j, TELEMETRY_TOPIC);
    assert_eq!(telem.len(), 1);
    assert!(telem[0]["temperature"].is_null());
    assert!(published(&j, NOTIFICATION_TOPIC).is_empty());
    assert!(pulses(&j).is_empty());
    assert_eq!(report.alarm, None);
    assert!(!report.alerts.any_alert);
}

#[test]
fn nan_reading_behaves_like_invalid() {
    let j = journal();
    let sample = SampleSet {
        temperature: Some(f32::NAN),
        humidity: Some(f32::NAN),
        ..calm()
    };
    let mut hw = MockHardware::new(&j, [sample]);
    let mut broker = MockBroker::connected(&j);
    let mut svc = MonitorService::new(MonitorConfig::default(), 0);

    svc.fire(60_000, &mut hw, &mut broker, &mut LogSink::new());

    let telem = published(&j, TELEMETRY_TOPIC);
    assert!(telem[0]["temperature"].is_null());
    assert!(telem[0]["humidity"].is_null());
    assert!(published(&j, NOTIFICATION_TOPIC).is_empty());
}

// ── Everything over: five alerts, one general alarm ───────────

#[test]
fn all_channels_over_limit_alert_in_fixed_order() {
    let j = journal();
    let sample = SampleSet {
        temperature: Some(41.0),
        humidity: Some(85.5),
        gas: 900,
        vibration: 1,
        sound: 2_000,
        flame: false,
        timestamp_ms: 0,
    };
    let mut hw = MockHardware::new(&j, [sample]);
    let mut broker = MockBroker::connected(&j);
    let mut sink = LogSink::new();
    let mut svc = MonitorService::new(MonitorConfig::default(), 0);

    let report = svc.fire(60_000, &mut hw, &mut broker, &mut sink);

    let sensors: Vec<_> = published(&j, NOTIFICATION_TOPIC)
        .iter()
        .map(|b| b["sensor"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(sensors, ["temperature", "humidity", "gas", "vibration", "sound"]);
    let channels: Vec<_> = report.alerts.alerts.iter().map(|a| a.channel).collect();
    assert_eq!(channels, Channel::THRESHOLDED);

    assert_eq!(pulses(&j), [general()]);
    assert_eq!(report.published, 6);
}

#[test]
fn reading_exactly_at_limit_does_not_alert() {
    let j = journal();
    let sample = SampleSet {
        temperature: Some(30.0),
        humidity: Some(70.0),
        gas: 500,
        sound: 1_000,
        ..calm()
    };
    let mut hw = MockHardware::new(&j, [sample]);
    let mut broker = MockBroker::connected(&j);
    let mut svc = MonitorService::new(MonitorConfig::default(), 0);

    svc.fire(60_000, &mut hw, &mut broker, &mut LogSink::new());

    assert!(published(&j, NOTIFICATION_TOPIC).is_empty());
    assert!(pulses(&j).is_empty());
}

// ── Ordering ──────────────────────────────────────────────────

#[test]
fn telemetry_then_alerts_then_alarm() {
    let j = journal();
    let sample = SampleSet {
        gas: 800,
        sound: 1_500,
        flame: true,
        ..calm()
    };
    let mut hw = MockHardware::new(&j, [sample]);
    let mut broker = MockBroker::connected(&j);
    let mut svc = MonitorService::new(MonitorConfig::default(), 0);

    svc.fire(60_000, &mut hw, &mut broker, &mut LogSink::new());

    let ops = j.borrow();
    let kinds: Vec<&str> = ops
        .iter()
        .map(|op| match op {
            Op::Publish { topic, .. } if topic == TELEMETRY_TOPIC => "telemetry",
            Op::Publish { .. } => "alert",
            Op::Pulse { .. } => "alarm",
        })
        .collect();
    assert_eq!(kinds, ["telemetry", "alert", "alert", "alert", "alarm"]);

    // Flame alert comes last among the alerts, and only the flame
    // pattern sounds even though other channels fired.
    match &ops[3] {
        Op::Publish { body, .. } => assert!(body.contains("\"sensor\":\"flame\"")),
        other => panic!("expected flame alert, got {other:?}"),
    }
    assert_eq!(ops[4], Op::Pulse {
        count: flame().0,
        on_ms: flame().1,
        off_ms: flame().2,
    });
}

#[test]
fn identical_samples_give_identical_alert_sets() {
    let j = journal();
    let sample = SampleSet {
        humidity: Some(90.0),
        ..calm()
    };
    let mut hw = MockHardware::new(&j, [sample, sample]);
    let mut broker = MockBroker::connected(&j);
    let mut svc = MonitorService::new(MonitorConfig::default(), 0);

    let a = svc.fire(60_000, &mut hw, &mut broker, &mut LogSink::new());
    let b = svc.fire(120_000, &mut hw, &mut broker, &mut LogSink::new());
    assert_eq!(a.alerts, b.alerts);
    assert_eq!(pulses(&j), [general(), general()]);
}
