//! Telemetry / notification body codec.
//!
//! Both bodies are flat JSON objects with a fixed field order so that
//! downstream consumers can parse them by field name without any schema:
//!
//! ```text
//! datacenter/sensor_data   {"temperature":35.2,"humidity":50.0,"gas":100,
//!                           "vibration":0,"sound":200,"flame":0}
//! datacenter/notification  {"sensor":"temperature","value":35.2,
//!                           "type":"critical","message":"Critical! ..."}
//! ```
//!
//! Real values are rounded to one decimal place; counts and levels are plain
//! integers.  An invalid reading is rendered as `null` rather than dropping
//! the field.  A notification that would exceed [`MAX_BODY_LEN`] has its
//! `message` truncated; `sensor`, `value` and `type` are never touched.

use log::warn;
use serde::{Serialize, Serializer};

use crate::error::EncodeError;
use crate::monitor::sample::round1;
use crate::monitor::{Alert, SampleSet, Severity, Value};

/// Largest body the broker client is asked to publish (bytes).
pub const MAX_BODY_LEN: usize = 256;

// ── Wire structs ──────────────────────────────────────────────

#[derive(Serialize)]
struct TelemetryBody {
    #[serde(serialize_with = "one_decimal")]
    temperature: Option<f32>,
    #[serde(serialize_with = "one_decimal")]
    humidity: Option<f32>,
    gas: u16,
    vibration: u8,
    sound: u16,
    flame: u8,
}

#[derive(Serialize)]
struct NotificationBody<'a> {
    sensor: &'a str,
    value: WireValue,
    #[serde(rename = "type")]
    kind: Severity,
    message: &'a str,
}

struct WireValue(Value);

impl Serialize for WireValue {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Real(v) => s.serialize_f32(round1(v)),
            Value::Int(v) => s.serialize_i32(v),
        }
    }
}

fn one_decimal<S: Serializer>(v: &Option<f32>, s: S) -> Result<S::Ok, S::Error> {
    match v {
        Some(v) if v.is_finite() => s.serialize_f32(round1(*v)),
        _ => s.serialize_none(),
    }
}

// ── Encoders ──────────────────────────────────────────────────

/// Encode a full sample for the telemetry topic.
pub fn encode_sample(sample: &SampleSet) -> Result<String, EncodeError> {
    let body = TelemetryBody {
        temperature: sample.temperature,
        humidity: sample.humidity,
        gas: sample.gas,
        vibration: sample.vibration,
        sound: sample.sound,
        flame: u8::from(sample.flame),
    };
    let json = serde_json::to_string(&body).map_err(|_| EncodeError::Serialize)?;
    if json.len() > MAX_BODY_LEN {
        return Err(EncodeError::BodyTooLarge {
            len: json.len(),
            max: MAX_BODY_LEN,
        });
    }
    Ok(json)
}

/// Encode one alert for the notification topic, bounded by [`MAX_BODY_LEN`].
pub fn encode_alert(alert: &Alert) -> Result<String, EncodeError> {
    encode_alert_within(alert, MAX_BODY_LEN)
}

/// Encode one alert, truncating only its message to fit in `max_len` bytes.
pub fn encode_alert_within(alert: &Alert, max_len: usize) -> Result<String, EncodeError> {
    let mut message = alert.message.as_str();
    loop {
        let body = NotificationBody {
            sensor: alert.channel.name(),
            value: WireValue(alert.value),
            kind: alert.severity,
            message,
        };
        let json = serde_json::to_string(&body).map_err(|_| EncodeError::Serialize)?;
        if json.len() <= max_len {
            if message.len() < alert.message.len() {
                warn!(
                    "codec: {} alert message truncated to {} bytes",
                    alert.channel,
                    message.len()
                );
            }
            return Ok(json);
        }
        if message.is_empty() {
            return Err(EncodeError::BodyTooLarge {
                len: json.len(),
                max: max_len,
            });
        }
        // Each dropped message byte shrinks the body by at least one byte
        // (escapes only make it shrink faster), so this converges.
        let keep = message.len().saturating_sub(json.len() - max_len);
        message = truncate_on_char_boundary(message, keep);
    }
}

fn truncate_on_char_boundary(s: &str, max: usize) -> &str {
    let mut end = max.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
