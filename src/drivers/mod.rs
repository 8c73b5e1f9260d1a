//! Actuator drivers and hardware initialisation helpers.

pub mod buzzer;
pub mod hw_init;
