//! Domain layer - pure sampling policy independent of the hardware
//!
//! Unit conversion, the smart-send filter, readings, measurement settings,
//! the per-cycle context and interval tracking.

pub mod context;
pub mod conversion;
pub mod reading;
pub mod schedule;
pub mod settings;
pub mod smart_send;

pub use context::{CycleContext, PowerMode};
pub use conversion::{ConversionType, RawSample, UnknownConversion};
pub use reading::{MeasurementUnit, Reading, SensorId, SensorIdentity};
pub use schedule::{IntervalConfig, IntervalTracker};
pub use settings::{GasHeaterProfile, IirFilter, MeasurementSettings, Oversampling};
pub use smart_send::SmartSendFilter;
