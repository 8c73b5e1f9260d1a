//! Digital threshold modules: SW-420 vibration switch and IR flame sensor.
//!
//! Each module has an on-board comparator; the MCU only sees a level.
//! The active level differs per module (flame boards pull low on
//! detection), so every input carries its own polarity.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads real GPIO levels via hw_init helpers.
//! On host/test: raw levels come from static atomics, defaulting to idle.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(not(target_os = "espidf"))]
use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_VIBRATION_LEVEL: AtomicBool = AtomicBool::new(false);
#[cfg(not(target_os = "espidf"))]
static SIM_FLAME_LEVEL: AtomicBool = AtomicBool::new(true);

/// Inject a vibration state; the module is active-high.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_vibration(detected: bool) {
    SIM_VIBRATION_LEVEL.store(detected, Ordering::Relaxed);
}

/// Inject a *logical* flame state; the module is active-low.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_flame(detected: bool) {
    SIM_FLAME_LEVEL.store(!detected, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveLevel {
    High,
    Low,
}

pub struct DigitalInput {
    gpio: i32,
    active: ActiveLevel,
}

impl DigitalInput {
    pub fn new(gpio: i32, active: ActiveLevel) -> Self {
        Self { gpio, active }
    }

    /// `true` when the module reports its condition.
    pub fn is_active(&self) -> bool {
        let level = self.read_level();
        match self.active {
            ActiveLevel::High => level,
            ActiveLevel::Low => !level,
        }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    #[cfg(target_os = "espidf")]
    fn read_level(&self) -> bool {
        hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_level(&self) -> bool {
        match self.gpio {
            pins::FLAME_GPIO => SIM_FLAME_LEVEL.load(Ordering::Relaxed),
            pins::VIBRATION_GPIO => SIM_VIBRATION_LEVEL.load(Ordering::Relaxed),
            _ => false,
        }
    }
}
