//! dcmon firmware main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter      MqttTransport       LogEventSink         │
//! │  (Sensor + Alarm)     (Transport, WiFi)   (EventSink)          │
//! │  SystemClock (Clock)                                           │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            MonitorService (pure logic)                 │    │
//! │  │  Heartbeat · Thresholds · Flame edge · Codec           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Result, anyhow};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{debug, info};

use dcmon::adapters::hardware::HardwareAdapter;
use dcmon::adapters::log_sink::LogEventSink;
use dcmon::adapters::mqtt::MqttTransport;
use dcmon::adapters::time::SystemClock;
use dcmon::adapters::wifi::WifiAdapter;
use dcmon::app::ports::ClockPort;
use dcmon::app::service::MonitorService;
use dcmon::config::{MonitorConfig, NetworkConfig};
use dcmon::drivers::buzzer::Buzzer;
use dcmon::drivers::hw_init::{self, RawOutputPin};
use dcmon::pins;
use dcmon::sensors::SensorHub;

/// Main-loop idle between heartbeat polls.
const LOOP_IDLE_MS: u32 = 100;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("dcmon v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = MonitorConfig::default();
    config.validate().map_err(|e| anyhow!("invalid config: {e}"))?;
    let network = NetworkConfig::from_build_env();

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(|e| anyhow!("HAL init failed: {e}"))?;

    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let esp_wifi = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sys_loop.clone(), Some(nvs))?,
        sys_loop,
    )?;

    // ── 4. Adapters ───────────────────────────────────────────
    let mut wifi = WifiAdapter::new(esp_wifi);
    wifi.set_credentials(network.wifi_ssid, network.wifi_password)
        .map_err(|e| anyhow!("WiFi credentials: {e}"))?;
    let mut link = MqttTransport::new(wifi, network);

    let buzzer = Buzzer::new(RawOutputPin::new(pins::BUZZER_GPIO), FreeRtos);
    let mut hw = HardwareAdapter::new(SensorHub::with_board_pins(), buzzer);
    let clock = SystemClock::new();
    let mut sink = LogEventSink::new();
    let mut delay = FreeRtos;

    // ── 5. Monitor loop ───────────────────────────────────────
    let mut service = MonitorService::new(config, clock.now_ms());
    service.start(&mut sink);

    loop {
        if let Some(report) = service.tick(&clock, &mut hw, &mut link, &mut delay, &mut sink) {
            debug!(
                "cycle {}: {} publish(es), {} alert(s), alarm={:?}",
                service.cycles(),
                report.published,
                report.alerts.alerts.len(),
                report.alarm
            );
        }
        FreeRtos::delay_ms(LOOP_IDLE_MS);
    }
}
