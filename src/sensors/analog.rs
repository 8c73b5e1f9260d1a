//! Raw analog sensors on ADC1: MQ-2 gas and the sound envelope.
//!
//! Both are reported as the raw 12-bit count (0–4095); thresholds are
//! expressed in the same unit, so no calibration is applied.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: oneshot ADC1 reads via hw_init.
//! On host/test: reads from static `AtomicU16`s for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_GAS_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_SOUND_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gas_adc(raw: u16) {
    SIM_GAS_ADC.store(raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_sound_adc(raw: u16) {
    SIM_SOUND_ADC.store(raw, Ordering::Relaxed);
}

/// Full-scale count of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogChannel {
    Gas,
    Sound,
}

pub struct AnalogSensor {
    channel: AnalogChannel,
    last_raw: u16,
}

impl AnalogSensor {
    pub fn new(channel: AnalogChannel) -> Self {
        Self {
            channel,
            last_raw: 0,
        }
    }

    pub fn read(&mut self) -> u16 {
        self.last_raw = self.read_adc().min(ADC_MAX);
        self.last_raw
    }

    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }

    pub fn channel(&self) -> AnalogChannel {
        self.channel
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        match self.channel {
            AnalogChannel::Gas => hw_init::adc1_read(hw_init::ADC1_CH_GAS),
            AnalogChannel::Sound => hw_init::adc1_read(hw_init::ADC1_CH_SOUND),
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        match self.channel {
            AnalogChannel::Gas => SIM_GAS_ADC.load(Ordering::Relaxed),
            AnalogChannel::Sound => SIM_SOUND_ADC.load(Ordering::Relaxed),
        }
    }
}
