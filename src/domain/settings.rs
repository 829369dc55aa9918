//! Measurement quality settings applied once after discovery

/// Oversampling rate for temperature, humidity or pressure.
///
/// Higher rates reduce noise at the cost of longer measurements and more
/// power per cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Oversampling {
    /// Channel disabled
    Skipped = 0,
    #[default]
    X1 = 1,
    X2 = 2,
    X4 = 3,
    X8 = 4,
    X16 = 5,
}

/// IIR filter size for temperature and pressure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IirFilter {
    /// Filter off
    #[default]
    Size0 = 0,
    Size1 = 1,
    Size3 = 2,
    Size7 = 3,
    Size15 = 4,
    Size31 = 5,
    Size63 = 6,
    Size127 = 7,
}

/// Gas heater plate profile
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GasHeaterProfile {
    /// Target plate temperature in °C
    pub target_celsius: u16,
    /// How long the temperature is held before the gas measurement
    pub duration_ms: u16,
}

/// Full measurement configuration handed to the sensor driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementSettings {
    pub temperature: Oversampling,
    pub humidity: Oversampling,
    pub pressure: Oversampling,
    pub filter: IirFilter,
    /// `None` disables the gas measurement
    pub heater: Option<GasHeaterProfile>,
}

impl MeasurementSettings {
    /// Settings applied to every discovered sensor
    pub const STANDARD: Self = Self {
        temperature: Oversampling::X8,
        humidity: Oversampling::X2,
        pressure: Oversampling::X4,
        filter: IirFilter::Size3,
        heater: Some(GasHeaterProfile {
            target_celsius: 320,
            duration_ms: 500,
        }),
    };

    /// Whether the gas heater is used
    pub fn gas_enabled(&self) -> bool {
        self.heater.is_some()
    }
}

impl Default for MeasurementSettings {
    fn default() -> Self {
        Self::STANDARD
    }
}
