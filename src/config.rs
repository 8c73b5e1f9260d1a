//! System configuration parameters
//!
//! All tunable parameters for the monitor.  Values are compile-time defaults;
//! the device keeps no persistent configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ── Compile-time limits ───────────────────────────────────────

pub const TEMPERATURE_LIMIT_C: f32 = 30.0;
pub const HUMIDITY_LIMIT_PCT: f32 = 70.0;
pub const GAS_LIMIT_RAW: u16 = 500;
pub const VIBRATION_LIMIT: u8 = 1;
pub const SOUND_LIMIT_RAW: u16 = 1000;

pub const HEARTBEAT_INTERVAL_MS: u32 = 60_000;
pub const RECONNECT_BACKOFF_MS: u32 = 5_000;

pub const TELEMETRY_TOPIC: &str = "datacenter/sensor_data";
pub const NOTIFICATION_TOPIC: &str = "datacenter/notification";

/// Per-channel alert limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Air temperature above which a critical alert fires (°C).
    pub temperature_c: f32,
    /// Relative humidity above which a warning fires (%).
    pub humidity_pct: f32,
    /// Gas sensor raw count above which a critical alert fires.
    pub gas_raw: u16,
    /// Vibration level at which a warning fires.
    pub vibration: u8,
    /// Sound sensor raw count above which a warning fires.
    pub sound_raw: u16,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            temperature_c: TEMPERATURE_LIMIT_C,
            humidity_pct: HUMIDITY_LIMIT_PCT,
            gas_raw: GAS_LIMIT_RAW,
            vibration: VIBRATION_LIMIT,
            sound_raw: SOUND_LIMIT_RAW,
        }
    }
}

/// A buzzer pulse train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmPattern {
    pub count: u8,
    pub on_ms: u32,
    pub off_ms: u32,
}

impl AlarmPattern {
    /// Total time the pattern blocks the control loop, saturating at
    /// `u32::MAX` for absurd deserialized patterns.
    pub fn duration_ms(&self) -> u32 {
        u32::from(self.count).saturating_mul(self.on_ms.saturating_add(self.off_ms))
    }
}

/// Monitor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Timing ---
    /// Period between sample/publish cycles (milliseconds)
    pub heartbeat_interval_ms: u32,
    /// Delay between broker connection attempts (milliseconds)
    pub reconnect_backoff_ms: u32,

    // --- Thresholds ---
    pub thresholds: ThresholdConfig,

    // --- Alarm ---
    /// Short pattern for any non-flame alert
    pub general_alarm: AlarmPattern,
    /// Longer pattern for a flame rising edge
    pub flame_alarm: AlarmPattern,

    // --- Topics ---
    pub telemetry_topic: heapless::String<64>,
    pub notification_topic: heapless::String<64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_ms: HEARTBEAT_INTERVAL_MS,
            reconnect_backoff_ms: RECONNECT_BACKOFF_MS,

            thresholds: ThresholdConfig::default(),

            general_alarm: AlarmPattern {
                count: 4,
                on_ms: 200,
                off_ms: 200,
            },
            flame_alarm: AlarmPattern {
                count: 10,
                on_ms: 300,
                off_ms: 100,
            },

            telemetry_topic: topic(TELEMETRY_TOPIC),
            notification_topic: topic(NOTIFICATION_TOPIC),
        }
    }
}

fn topic(s: &str) -> heapless::String<64> {
    let mut t = heapless::String::new();
    // Both default topics are well under 64 bytes.
    let _ = t.push_str(s);
    t
}

impl MonitorConfig {
    /// Reject configurations the monitor cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.heartbeat_interval_ms == 0 {
            return Err(Error::Config("heartbeat_interval_ms must be > 0"));
        }
        if self.reconnect_backoff_ms == 0 {
            return Err(Error::Config("reconnect_backoff_ms must be > 0"));
        }
        if self.general_alarm.count == 0 || self.flame_alarm.count == 0 {
            return Err(Error::Config("alarm patterns need at least one pulse"));
        }
        if self.flame_alarm.duration_ms() <= self.general_alarm.duration_ms() {
            return Err(Error::Config("flame alarm must be longer than the general alarm"));
        }
        if self.telemetry_topic.is_empty() || self.notification_topic.is_empty() {
            return Err(Error::Config("topics must not be empty"));
        }
        if self.telemetry_topic == self.notification_topic {
            return Err(Error::Config("telemetry and notification topics must differ"));
        }
        Ok(())
    }
}

// ── Network (compile-time) ────────────────────────────────────

/// Link and broker settings, baked in at build time.
///
/// Override with `DCMON_WIFI_SSID`, `DCMON_WIFI_PASS`, `DCMON_MQTT_URL`
/// and `DCMON_MQTT_CLIENT_ID` in the build environment.
#[derive(Debug, Clone, Copy)]
pub struct NetworkConfig {
    pub wifi_ssid: &'static str,
    pub wifi_password: &'static str,
    pub mqtt_url: &'static str,
    pub mqtt_client_id: &'static str,
}

impl NetworkConfig {
    pub const fn from_build_env() -> Self {
        Self {
            wifi_ssid: match option_env!("DCMON_WIFI_SSID") {
                Some(s) => s,
                None => "CHANGE_ME",
            },
            wifi_password: match option_env!("DCMON_WIFI_PASS") {
                Some(s) => s,
                None => "CHANGE_ME",
            },
            mqtt_url: match option_env!("DCMON_MQTT_URL") {
                Some(s) => s,
                None => "mqtt://192.168.1.10:1883",
            },
            mqtt_client_id: match option_env!("DCMON_MQTT_CLIENT_ID") {
                Some(s) => s,
                None => "dcmon-esp32",
            },
        }
    }
}
