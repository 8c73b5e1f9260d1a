//! Fuzz target: `encode_alert_within`
//!
//! Builds an alert whose message is arbitrary UTF-8 and checks that the
//! encoded body always fits the requested bound, always parses as JSON,
//! and keeps `sensor`, `value` and `type` intact.
//!
//! cargo fuzz run fuzz_alert_codec

#![no_main]

use dcmon::monitor::{Alert, Channel, Severity, Value};
use dcmon::telemetry::{MAX_BODY_LEN, encode_alert_within};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&limit, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = core::str::from_utf8(rest) else {
        return;
    };

    let mut alert = Alert::new(Channel::Sound, Value::Int(4095), Severity::Warning);
    alert.message.clear();
    for ch in text.chars() {
        if alert.message.push(ch).is_err() {
            break;
        }
    }

    // 64 bytes always holds the fixed fields with an empty message.
    let max = 64 + usize::from(limit) % (MAX_BODY_LEN - 63);
    let body = encode_alert_within(&alert, max).expect("fixed fields fit");
    assert!(body.len() <= max, "body exceeds bound");

    let v: serde_json::Value = serde_json::from_str(&body).expect("body is JSON");
    assert_eq!(v["sensor"], "sound");
    assert_eq!(v["value"], 4095);
    assert_eq!(v["type"], "warning");
});
