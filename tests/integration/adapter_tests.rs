//! Full host stack: simulated board + simulated broker + real service.
//!
//! The sensor simulation backends are process-wide statics, so this is
//! the only test in the binary that drives them.

use dcmon::adapters::hardware::HardwareAdapter;
use dcmon::adapters::log_sink::LogEventSink;
use dcmon::adapters::mqtt::MqttTransport;
use dcmon::adapters::wifi::WifiAdapter;
use dcmon::app::service::MonitorService;
use dcmon::config::{MonitorConfig, NOTIFICATION_TOPIC, NetworkConfig, TELEMETRY_TOPIC};
use dcmon::drivers::buzzer::Buzzer;
use dcmon::drivers::hw_init::RawOutputPin;
use dcmon::pins;
use dcmon::sensors::{SensorHub, analog, dht, digital};

use super::mock_hw::{MockClock, MockDelay};

#[test]
fn simulated_board_through_mqtt_adapter() {
    let mut wifi = WifiAdapter::new();
    wifi.set_credentials("DC-Floor2", "password1").unwrap();
    let mut link = MqttTransport::new(wifi, NetworkConfig::from_build_env());
    link.wifi_mut().sim_fail_next(1);
    link.sim_refuse_next(1);

    let buzzer = Buzzer::new(RawOutputPin::new(pins::BUZZER_GPIO), MockDelay::default());
    let mut hw = HardwareAdapter::new(SensorHub::with_board_pins(), buzzer);
    let mut sink = LogEventSink::new();
    let mut delay = MockDelay::default();
    let mut svc = MonitorService::new(MonitorConfig::default(), 0);
    svc.start(&mut sink);

    // Cycle 1: hot rack.
    dht::sim_set_dht(35.2, 50.0);
    analog::sim_set_gas_adc(100);
    analog::sim_set_sound_adc(200);
    digital::sim_set_vibration(false);
    digital::sim_set_flame(false);

    let report = svc
        .tick(&MockClock::at(60_000), &mut hw, &mut link, &mut delay, &mut sink)
        .expect("heartbeat due");
    // One link failure and one broker refusal before the session came up.
    assert_eq!(delay.total_ms(), 2 * 5_000);
    assert_eq!(report.alerts.alerts.len(), 1);
    assert_eq!(hw.buzzer().pulses(), 4);

    // Cycle 2: flame, sensor dead.
    dht::sim_disconnect_dht();
    digital::sim_set_flame(true);
    let report = svc
        .tick(&MockClock::at(120_000), &mut hw, &mut link, &mut delay, &mut sink)
        .expect("heartbeat due");
    assert_eq!(report.sample.temperature, None);
    assert!(report.alerts.flame_rising());
    assert_eq!(hw.buzzer().pulses(), 4 + 10);

    let topics: Vec<_> = link.sim_published().iter().map(|p| p.topic.as_str()).collect();
    assert_eq!(
        topics,
        [TELEMETRY_TOPIC, NOTIFICATION_TOPIC, TELEMETRY_TOPIC, NOTIFICATION_TOPIC]
    );
    assert!(link.sim_published()[2].body_str().contains("\"temperature\":null"));
    assert!(link.sim_published()[3].body_str().contains("Flame detected"));
    assert_eq!(link.publish_failures(), 0);
    assert_eq!(hw.sensors().reads(), 2);
}
