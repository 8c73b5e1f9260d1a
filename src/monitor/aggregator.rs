//! Alert aggregator.
//!
//! Runs the threshold policy over every thresholded channel and the flame
//! detector over the flame reading, once per heartbeat.  Alerts come out in
//! fixed wire order (temperature, humidity, gas, vibration, sound, flame);
//! the order only affects message ordering on the wire.
//!
//! The only side effect is the single flame-detector update per call.

use super::flame::{FlameEdgeDetector, FlameEvent};
use super::sample::SampleSet;
use super::threshold::{self, Alert, ThresholdSpec};
use crate::config::ThresholdConfig;

/// Upper bound on alerts per cycle: one per thresholded channel plus flame.
pub const MAX_ALERTS: usize = 6;

/// Alerts raised in one cycle.
pub type AlertList = heapless::Vec<Alert, MAX_ALERTS>;

/// Outcome of aggregating one [`SampleSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct CycleAlerts {
    /// At most one alert per channel, in wire order.
    pub alerts: AlertList,
    /// `true` iff `alerts` is non-empty or the flame rising edge fired.
    pub any_alert: bool,
    /// Flame edge seen this cycle, if any.
    pub flame_event: Option<FlameEvent>,
}

impl CycleAlerts {
    pub fn flame_rising(&self) -> bool {
        self.flame_event == Some(FlameEvent::Rising)
    }
}

/// Owns the threshold table and the flame detector for one chassis.
pub struct AlertAggregator {
    specs: [ThresholdSpec; 5],
    flame: FlameEdgeDetector,
}

impl AlertAggregator {
    pub fn new(thresholds: &ThresholdConfig) -> Self {
        Self {
            specs: ThresholdSpec::table(thresholds),
            flame: FlameEdgeDetector::new(),
        }
    }

    /// Evaluate one sample.  Cannot fail.
    pub fn aggregate(&mut self, sample: &SampleSet) -> CycleAlerts {
        let mut alerts = AlertList::new();

        for spec in &self.specs {
            if let Some(alert) = threshold::evaluate(spec, sample.value(spec.channel)) {
                // Capacity covers every channel, so this never drops.
                let _ = alerts.push(alert);
            }
        }

        let flame_event = self.flame.update(sample.flame);
        if flame_event == Some(FlameEvent::Rising) {
            let _ = alerts.push(Alert::flame());
        }

        CycleAlerts {
            any_alert: !alerts.is_empty(),
            alerts,
            flame_event,
        }
    }

    pub fn specs(&self) -> &[ThresholdSpec; 5] {
        &self.specs
    }

    pub fn flame_detector(&self) -> &FlameEdgeDetector {
        &self.flame
    }
}
