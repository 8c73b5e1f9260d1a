//! Sampled data model: channels, values, and the per-heartbeat [`SampleSet`].

use core::fmt;

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// Every monitored sensor channel on the chassis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Temperature,
    Humidity,
    Gas,
    Vibration,
    Sound,
    Flame,
}

impl Channel {
    /// Threshold-evaluated channels, in wire order.  Flame is handled by the
    /// edge detector instead.
    pub const THRESHOLDED: [Channel; 5] = [
        Channel::Temperature,
        Channel::Humidity,
        Channel::Gas,
        Channel::Vibration,
        Channel::Sound,
    ];

    /// Field / sensor name used on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Gas => "gas",
            Self::Vibration => "vibration",
            Self::Sound => "sound",
            Self::Flame => "flame",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A single channel reading.
///
/// `Real` values come from the DHT22 and are reported with one decimal;
/// `Int` values are raw ADC counts or digital levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Real(f32),
    Int(i32),
}

impl Value {
    pub fn as_f32(self) -> f32 {
        match self {
            Self::Real(v) => v,
            Self::Int(v) => v as f32,
        }
    }

    /// `false` for NaN / infinite reals.  Integers are always valid.
    pub fn is_valid(self) -> bool {
        match self {
            Self::Real(v) => v.is_finite(),
            Self::Int(_) => true,
        }
    }
}

/// Round to the one decimal every rendering of a reading uses.
///
/// The message text and the wire `value` both go through this, so an
/// alert never disagrees with itself at a half-way reading.
pub fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(v) => write!(f, "{:.1}", round1(*v)),
            Self::Int(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SampleSet
// ---------------------------------------------------------------------------

/// One heartbeat's worth of readings from every sensor.
///
/// Built fresh by the sensor reader each cycle and never mutated afterwards.
/// `None` marks an invalid reading (DHT22 timeout or checksum failure).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleSet {
    /// Air temperature (°C).
    pub temperature: Option<f32>,
    /// Relative humidity (%).
    pub humidity: Option<f32>,
    /// Gas sensor raw ADC count (0 – 4095).
    pub gas: u16,
    /// Vibration switch level: 1 = vibration detected.
    pub vibration: u8,
    /// Sound sensor raw ADC count (0 – 4095).
    pub sound: u16,
    /// Flame detected on this read.
    pub flame: bool,
    /// Milliseconds since boot when the sample was taken.
    pub timestamp_ms: u64,
}

impl SampleSet {
    /// The value of a thresholded channel, `None` when invalid.
    ///
    /// Flame is a boolean and is reported as `Int(0|1)`.
    pub fn value(&self, channel: Channel) -> Option<Value> {
        let value = match channel {
            Channel::Temperature => Value::Real(self.temperature?),
            Channel::Humidity => Value::Real(self.humidity?),
            Channel::Gas => Value::Int(i32::from(self.gas)),
            Channel::Vibration => Value::Int(i32::from(self.vibration)),
            Channel::Sound => Value::Int(i32::from(self.sound)),
            Channel::Flame => Value::Int(i32::from(self.flame)),
        };
        value.is_valid().then_some(value)
    }
}
