//! GPIO / peripheral pin assignments for the monitor board (ESP32 DevKitC).
//!
//! Single source of truth: drivers reference this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Temperature / humidity (DHT22, single-wire)
// ---------------------------------------------------------------------------

/// Open-drain data line with external 10 kΩ pull-up.
pub const DHT_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Analog sensors (ADC1; ADC2 is unusable while WiFi is up)
// ---------------------------------------------------------------------------

/// MQ-2 gas sensor analog output.  ADC1 channel 6.
pub const GAS_ADC_GPIO: i32 = 34;
/// Electret microphone module analog envelope.  ADC1 channel 7.
pub const SOUND_ADC_GPIO: i32 = 35;

// ---------------------------------------------------------------------------
// Digital sensors
// ---------------------------------------------------------------------------

/// SW-420 vibration switch.  HIGH = vibration.
pub const VIBRATION_GPIO: i32 = 27;
/// IR flame module digital output.  LOW = flame detected.
pub const FLAME_GPIO: i32 = 26;

// ---------------------------------------------------------------------------
// Alarm
// ---------------------------------------------------------------------------

/// Active buzzer (driven HIGH to sound).
pub const BUZZER_GPIO: i32 = 25;
