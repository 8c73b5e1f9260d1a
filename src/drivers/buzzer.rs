//! Active buzzer driver.
//!
//! Generic over any [`OutputPin`] and [`DelayNs`], so the same pulse-train
//! logic runs on the ESP32 (raw GPIO + FreeRTOS delay) and in host tests
//! (recording pin + counting delay).
//!
//! Pulsing is blocking: the caller's thread is held for
//! `count × (on_ms + off_ms)` milliseconds.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::AlarmPort;

pub struct Buzzer<P, D> {
    pin: P,
    delay: D,
    pulses: u32,
}

impl<P: OutputPin, D: DelayNs> Buzzer<P, D> {
    /// Wrap `pin` and force it low.
    pub fn new(mut pin: P, delay: D) -> Self {
        if pin.set_low().is_err() {
            warn!("buzzer: failed to drive pin low at init");
        }
        Self {
            pin,
            delay,
            pulses: 0,
        }
    }

    fn drive(&mut self, on: bool) {
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if res.is_err() {
            warn!("buzzer: pin write failed (on={})", on);
        }
    }

    /// Total pulses emitted since construction.
    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    /// Give the pin and delay back (tests inspect them).
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P: OutputPin, D: DelayNs> AlarmPort for Buzzer<P, D> {
    fn pulse(&mut self, count: u8, on_ms: u32, off_ms: u32) {
        for _ in 0..count {
            self.drive(true);
            self.delay.delay_ms(on_ms);
            self.drive(false);
            self.delay.delay_ms(off_ms);
            self.pulses = self.pulses.saturating_add(1);
        }
    }
}
