//! Ports (interfaces) defining the boundaries of the sampling policy
//!
//! - **EnvironmentalSensorPort**: the physical sensor driver
//! - **CalculationPort**: turns a converted value into a reading
//! - **ReadingSink**: where send-worthy readings are handed off

pub mod calculation;
pub mod environmental;
pub mod sink;

#[cfg(test)]
pub(crate) mod mock;

pub use calculation::CalculationPort;
pub use environmental::{DeviceError, EnvironmentalSensorPort};
pub use sink::{PublishError, ReadingSink};
