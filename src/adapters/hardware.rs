//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the [`Buzzer`], exposing them through
//! [`SensorPort`] and [`AlarmPort`].  On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::debug;

use crate::app::ports::{AlarmPort, SensorPort};
use crate::drivers::buzzer::Buzzer;
use crate::monitor::SampleSet;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P, D> {
    sensor_hub: SensorHub,
    buzzer: Buzzer<P, D>,
}

impl<P: OutputPin, D: DelayNs> HardwareAdapter<P, D> {
    pub fn new(sensor_hub: SensorHub, buzzer: Buzzer<P, D>) -> Self {
        Self { sensor_hub, buzzer }
    }

    pub fn sensors(&self) -> &SensorHub {
        &self.sensor_hub
    }

    pub fn buzzer(&self) -> &Buzzer<P, D> {
        &self.buzzer
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: OutputPin, D: DelayNs> SensorPort for HardwareAdapter<P, D> {
    fn read_sample(&mut self, now_ms: u64) -> SampleSet {
        let sample = self.sensor_hub.read_all(now_ms);
        debug!("hardware: sample {:?}", sample);
        sample
    }
}

// ── AlarmPort implementation ──────────────────────────────────

impl<P: OutputPin, D: DelayNs> AlarmPort for HardwareAdapter<P, D> {
    fn pulse(&mut self, count: u8, on_ms: u32, off_ms: u32) {
        self.buzzer.pulse(count, on_ms, off_ms);
    }
}
