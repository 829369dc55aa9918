//! Environmental sensor port - abstraction over the physical sensor driver
//!
//! The driver owns the bus traffic and the chip's compensation math. The
//! binding only needs to probe it, configure it, trigger readings and look at
//! the last cached values.

use crate::domain::{MeasurementSettings, RawSample};
use core::future::Future;

/// Error type for device operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// No sensor answered at the probed address
    NotFound,
    /// Bus communication failed
    Bus,
    /// The sensor did not deliver a measurement
    ReadFailed,
}

impl core::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "sensor not found"),
            Self::Bus => write!(f, "bus error"),
            Self::ReadFailed => write!(f, "reading failed"),
        }
    }
}

/// Port for a combined gas/temperature/humidity/pressure sensor
///
/// # Example Implementation
///
/// ```ignore
/// impl<I: I2c> EnvironmentalSensorPort for Bme680Adapter<I> {
///     async fn begin(&mut self, address: u8) -> Result<(), DeviceError> {
///         self.driver.init(address).await.map_err(|_| DeviceError::NotFound)
///     }
///
///     async fn perform_reading(&mut self) -> Result<(), DeviceError> {
///         let data = self.driver.measure().await.map_err(|_| DeviceError::ReadFailed)?;
///         self.last = RawSample { temperature_c: data.temperature(), ... };
///         Ok(())
///     }
///     // ...
/// }
/// ```
pub trait EnvironmentalSensorPort {
    /// Probe for the sensor at `address`
    fn begin(&mut self, address: u8) -> impl Future<Output = Result<(), DeviceError>>;

    /// Apply oversampling, filter and heater settings
    fn apply_settings(
        &mut self,
        settings: &MeasurementSettings,
    ) -> impl Future<Output = Result<(), DeviceError>>;

    /// Run one measurement and refresh the cached sample
    ///
    /// On failure the previously cached sample stays visible.
    fn perform_reading(&mut self) -> impl Future<Output = Result<(), DeviceError>>;

    /// Last cached sample
    fn sample(&self) -> RawSample;
}
