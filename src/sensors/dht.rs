//! DHT22 (AM2302) temperature / humidity sensor driver.
//!
//! The sensor answers a start pulse with a 40-bit frame:
//!
//! ```text
//!  byte 0..1  humidity × 10        (big-endian)
//!  byte 2..3  temperature × 10     (bit 15 = sign)
//!  byte 4     low byte of the sum of bytes 0..3
//! ```
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the open-drain data line via hw_init helpers.
//! On host/test: serves a frame from a static `AtomicU64`, so the
//! decode path is the same on both targets.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU64, Ordering};

use log::warn;

use crate::error::SensorError;

/// One decoded DHT22 frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhtReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Validate the checksum and decode a raw frame.
pub fn decode_frame(frame: [u8; 5]) -> Result<DhtReading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let raw_humidity = u16::from_be_bytes([frame[0], frame[1]]);
    let raw_temp = u16::from_be_bytes([frame[2], frame[3]]);

    let humidity_pct = f32::from(raw_humidity) / 10.0;
    let mut temperature_c = f32::from(raw_temp & 0x7FFF) / 10.0;
    if raw_temp & 0x8000 != 0 {
        temperature_c = -temperature_c;
    }

    // DHT22 datasheet range: -40..80 °C, 0..100 %RH.
    if !(-40.0..=80.0).contains(&temperature_c) || humidity_pct > 100.0 {
        return Err(SensorError::OutOfRange);
    }

    Ok(DhtReading {
        temperature_c,
        humidity_pct,
    })
}

/// Build the frame the sensor would send for `reading` (nearest 0.1).
pub fn encode_frame(reading: DhtReading) -> [u8; 5] {
    let humidity = (reading.humidity_pct * 10.0).round().clamp(0.0, f32::from(u16::MAX)) as u16;
    let magnitude = (reading.temperature_c.abs() * 10.0).round().min(f32::from(0x7FFF_u16)) as u16;
    let temp = if reading.temperature_c < 0.0 && magnitude != 0 {
        magnitude | 0x8000
    } else {
        magnitude
    };
    let [h0, h1] = humidity.to_be_bytes();
    let [t0, t1] = temp.to_be_bytes();
    let sum = h0.wrapping_add(h1).wrapping_add(t0).wrapping_add(t1);
    [h0, h1, t0, t1, sum]
}

// ── Host simulation ───────────────────────────────────────────

/// Frame in the low 40 bits; bit 63 set = sensor not responding.
#[cfg(not(target_os = "espidf"))]
static SIM_DHT_FRAME: AtomicU64 = AtomicU64::new(SIM_NO_RESPONSE);

#[cfg(not(target_os = "espidf"))]
const SIM_NO_RESPONSE: u64 = 1 << 63;

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_dht(temperature_c: f32, humidity_pct: f32) {
    sim_set_dht_frame(encode_frame(DhtReading {
        temperature_c,
        humidity_pct,
    }));
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_dht_frame(frame: [u8; 5]) {
    let mut bytes = [0u8; 8];
    bytes[3..].copy_from_slice(&frame);
    SIM_DHT_FRAME.store(u64::from_be_bytes(bytes), Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_disconnect_dht() {
    SIM_DHT_FRAME.store(SIM_NO_RESPONSE, Ordering::Relaxed);
}

// ── Driver ────────────────────────────────────────────────────

pub struct Dht22Sensor {
    _gpio: i32,
    last: Option<DhtReading>,
    failures: u32,
}

impl Dht22Sensor {
    pub fn new(gpio: i32) -> Self {
        Self {
            _gpio: gpio,
            last: None,
            failures: 0,
        }
    }

    /// One read; `None` on timeout, checksum or range failure.
    pub fn read(&mut self) -> Option<DhtReading> {
        match self.read_frame().and_then(decode_frame) {
            Ok(reading) => {
                self.last = Some(reading);
                Some(reading)
            }
            Err(e) => {
                self.failures = self.failures.saturating_add(1);
                warn!("DHT22 read failed: {} ({} total)", e, self.failures);
                None
            }
        }
    }

    /// Last successful reading, if any.
    pub fn last(&self) -> Option<DhtReading> {
        self.last
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    #[cfg(target_os = "espidf")]
    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        use crate::drivers::hw_init::{delay_us, gpio_read, gpio_write, now_us};

        let gpio = self._gpio;
        let wait_for = |level: bool, timeout_us: i64, stage: &'static str| {
            let deadline = now_us() + timeout_us;
            while now_us() <= deadline {
                if gpio_read(gpio) == level {
                    return Ok(());
                }
            }
            Err(SensorError::Timeout(stage))
        };

        // Start pulse: ≥1 ms low, then release.
        gpio_write(gpio, false);
        delay_us(2_000);
        gpio_write(gpio, true);
        delay_us(30);

        wait_for(false, 200, "response low")?;
        wait_for(true, 200, "response high")?;
        wait_for(false, 200, "data preamble")?;

        let mut frame = [0u8; 5];
        for byte in &mut frame {
            for _ in 0..8 {
                wait_for(true, 80, "bit high")?;
                let start = now_us();
                wait_for(false, 120, "bit low")?;
                // 26-28 µs high = 0, 70 µs high = 1
                *byte = (*byte << 1) | u8::from(now_us() - start > 50);
            }
        }
        Ok(frame)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        let packed = SIM_DHT_FRAME.load(Ordering::Relaxed);
        if packed & SIM_NO_RESPONSE != 0 {
            return Err(SensorError::Timeout("response low"));
        }
        let bytes = packed.to_be_bytes();
        let mut frame = [0u8; 5];
        frame.copy_from_slice(&bytes[3..]);
        Ok(frame)
    }
}
