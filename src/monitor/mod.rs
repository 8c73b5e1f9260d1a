//! Monitor core: threshold policy, flame debouncing and per-cycle alert
//! aggregation.  Pure logic, no I/O.

pub mod aggregator;
pub mod flame;
pub mod sample;
pub mod threshold;

pub use aggregator::{AlertAggregator, CycleAlerts};
pub use flame::{FlameEdgeDetector, FlameEvent, FlameState};
pub use sample::{Channel, SampleSet, Value};
pub use threshold::{Alert, Severity, ThresholdSpec};
