//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SampleSet`] each
//! heartbeat.  Drivers never fail the cycle: a DHT22 read error turns
//! into `None` for both temperature and humidity.

pub mod analog;
pub mod dht;
pub mod digital;

use analog::{AnalogChannel, AnalogSensor};
use dht::Dht22Sensor;
use digital::{ActiveLevel, DigitalInput};

use crate::monitor::SampleSet;
use crate::pins;

/// Aggregates all sensor drivers and produces one sample per heartbeat.
pub struct SensorHub {
    pub dht: Dht22Sensor,
    pub gas: AnalogSensor,
    pub sound: AnalogSensor,
    pub vibration: DigitalInput,
    pub flame: DigitalInput,
    reads: u32,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers.
    pub fn new(
        dht: Dht22Sensor,
        gas: AnalogSensor,
        sound: AnalogSensor,
        vibration: DigitalInput,
        flame: DigitalInput,
    ) -> Self {
        Self {
            dht,
            gas,
            sound,
            vibration,
            flame,
            reads: 0,
        }
    }

    /// Hub wired to the board pin map.
    pub fn with_board_pins() -> Self {
        Self::new(
            Dht22Sensor::new(pins::DHT_GPIO),
            AnalogSensor::new(AnalogChannel::Gas),
            AnalogSensor::new(AnalogChannel::Sound),
            DigitalInput::new(pins::VIBRATION_GPIO, ActiveLevel::High),
            DigitalInput::new(pins::FLAME_GPIO, ActiveLevel::Low),
        )
    }

    /// Read every sensor once and stamp the sample with `now_ms`.
    pub fn read_all(&mut self, now_ms: u64) -> SampleSet {
        self.reads = self.reads.saturating_add(1);
        let climate = self.dht.read();
        SampleSet {
            temperature: climate.map(|r| r.temperature_c),
            humidity: climate.map(|r| r.humidity_pct),
            gas: self.gas.read(),
            vibration: u8::from(self.vibration.is_active()),
            sound: self.sound.read(),
            flame: self.flame.is_active(),
            timestamp_ms: now_ms,
        }
    }

    /// Full sample reads since construction.
    pub fn reads(&self) -> u32 {
        self.reads
    }
}
