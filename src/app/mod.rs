//! Application core: pure domain logic, zero I/O.
//!
//! The heartbeat-driven monitor cycle lives here.  All interaction with
//! sensors, the broker and the buzzer happens through the **port traits**
//! in [`ports`], so this layer runs unchanged on the host test harness.

pub mod connect;
pub mod events;
pub mod ports;
pub mod service;
