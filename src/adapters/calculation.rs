//! Calculation adapters
//!
//! Implementations of [`CalculationPort`] that turn a converted value into the
//! reading posted upstream.

use crate::domain::{MeasurementUnit, Reading, SensorIdentity};
use crate::ports::CalculationPort;

/// Reports the converted value unchanged
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirectCalculation;

impl CalculationPort for DirectCalculation {
    fn calculate(
        &mut self,
        identity: &SensorIdentity,
        value: f32,
        unit: MeasurementUnit,
        should_post: bool,
    ) -> Reading {
        Reading::new(identity, value, unit, should_post)
    }
}

/// Field calibration applied after conversion
///
/// Reports `value * scale + offset` in the same unit.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinearCalculation {
    /// Scale factor
    pub scale: f32,
    /// Offset added after scaling
    pub offset: f32,
}

impl LinearCalculation {
    /// No correction
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: 0.0,
    };

    /// Create a calibration with custom parameters
    pub const fn new(scale: f32, offset: f32) -> Self {
        Self { scale, offset }
    }

    /// Constant offset only, e.g. for a sensor reading warm from its enclosure
    pub const fn offset(offset: f32) -> Self {
        Self { scale: 1.0, offset }
    }

    /// Create a calibration from two (measured, reference) pairs
    pub fn from_two_points(measured1: f32, reference1: f32, measured2: f32, reference2: f32) -> Self {
        // reference = scale * measured + offset
        let scale = (reference2 - reference1) / (measured2 - measured1);
        let offset = reference1 - scale * measured1;

        Self { scale, offset }
    }

    #[inline]
    pub fn apply(&self, value: f32) -> f32 {
        value * self.scale + self.offset
    }
}

impl Default for LinearCalculation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CalculationPort for LinearCalculation {
    fn calculate(
        &mut self,
        identity: &SensorIdentity,
        value: f32,
        unit: MeasurementUnit,
        should_post: bool,
    ) -> Reading {
        Reading::new(identity, self.apply(value), unit, should_post)
    }
}
