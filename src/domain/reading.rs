//! Reading domain entity
//!
//! A `Reading` is what one logical sensor hands upstream after a read. It has
//! no knowledge of how it is posted or stored.

use heapless::String;

/// Maximum length of a sensor's display name
pub const NAME_CAPACITY: usize = 32;

/// Maximum length of a sensor's short name
pub const SHORT_NAME_CAPACITY: usize = 16;

/// Sensor identifier as assigned by the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorId(pub u32);

impl SensorId {
    /// Get the raw ID value
    pub const fn value(&self) -> u32 {
        self.0
    }
}

/// Identity and display names of a logical sensor
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorIdentity {
    pub id: SensorId,
    pub name: String<NAME_CAPACITY>,
    pub short_name: String<SHORT_NAME_CAPACITY>,
}

/// Unit a converted value is reported in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementUnit {
    /// Relative humidity (%RH).
    RelativeHumidity,
    /// Degrees Celsius (°C).
    Celsius,
    /// Hectopascal (hPa).
    Hectopascal,
    /// Ohm (Ω).
    Ohm,
    /// Kiloohm (kΩ).
    Kilohm,
}

impl core::fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RelativeHumidity => write!(f, "%"),
            Self::Celsius => write!(f, "°C"),
            Self::Hectopascal => write!(f, "hPa"),
            Self::Ohm => write!(f, "Ω"),
            Self::Kilohm => write!(f, "kΩ"),
        }
    }
}

/// A converted value from one logical sensor.
///
/// Ephemeral: produced by a read, consumed by whoever posts it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub sensor_id: SensorId,
    pub name: String<NAME_CAPACITY>,
    pub short_name: String<SHORT_NAME_CAPACITY>,
    /// Converted value in `unit`
    pub value: f32,
    pub unit: MeasurementUnit,
    /// Whether this reading should be transmitted
    pub should_post: bool,
}

impl Reading {
    /// Create a reading for the given sensor identity
    pub fn new(
        identity: &SensorIdentity,
        value: f32,
        unit: MeasurementUnit,
        should_post: bool,
    ) -> Self {
        Self {
            sensor_id: identity.id,
            name: identity.name.clone(),
            short_name: identity.short_name.clone(),
            value,
            unit,
            should_post,
        }
    }
}
