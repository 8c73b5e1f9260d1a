//! Datacenter environmental monitor firmware library.
//!
//! Exposes the pure-logic modules for integration testing and fuzzing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; the host build gets simulation backends instead.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod monitor;
pub mod scheduler;
pub mod telemetry;

pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;
