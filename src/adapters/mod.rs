//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements          | Connects to                 |
//! |------------|---------------------|-----------------------------|
//! | `hardware` | SensorPort          | DHT22, ADC1, GPIO inputs    |
//! |            | AlarmPort           | Buzzer GPIO                 |
//! | `mqtt`     | TransportPort       | ESP-IDF MQTT client + WiFi  |
//! | `wifi`     | (used by `mqtt`)    | ESP-IDF WiFi STA            |
//! | `time`     | ClockPort           | ESP32 system timer          |
//! | `log_sink` | EventSink           | Serial log output           |

pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod time;
pub mod wifi;
