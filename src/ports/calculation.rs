//! Calculation port - turns a converted value into the reading posted upstream

use crate::domain::{MeasurementUnit, Reading, SensorIdentity};

/// Port for the calculation collaborator of a logical sensor
///
/// Receives the value after unit conversion and the final send decision.
pub trait CalculationPort {
    fn calculate(
        &mut self,
        identity: &SensorIdentity,
        value: f32,
        unit: MeasurementUnit,
        should_post: bool,
    ) -> Reading;
}

impl<T: CalculationPort + ?Sized> CalculationPort for &mut T {
    fn calculate(
        &mut self,
        identity: &SensorIdentity,
        value: f32,
        unit: MeasurementUnit,
        should_post: bool,
    ) -> Reading {
        (**self).calculate(identity, value, unit, should_post)
    }
}
