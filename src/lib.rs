//! BME680 cycle sampling library
//!
//! Sampling policy for one physical gas/temperature/humidity/pressure sensor
//! shared by several logical sensors, in a hexagonal layout:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - Reading entity, unit conversion                               │
//! │  - SmartSendFilter, IntervalTracker                              │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - EnvironmentalSensorPort: the physical sensor driver          │
//! │  - CalculationPort: value -> reading                            │
//! │  - ReadingSink: hand-off to the data pipeline                   │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │             Device / Sensors / Poller                            │
//! │  - DeviceRegistry -> DeviceBinding (discovery, one read/cycle)  │
//! │  - LogicalSensor (convert, filter, calculate)                   │
//! │  - CyclePoller (pre-cycle, read, post-cycle)                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All operations are async and meant for a single cooperative executor;
//! suspension points are sensor I/O, `yield_now` and injected delays.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

/// Domain layer - pure sampling policy
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Adapters - concrete implementations
pub mod adapters;

pub mod device;
pub mod poller;
pub mod sensor;

// Re-export key domain types
pub use domain::{
    ConversionType, CycleContext, IntervalConfig, MeasurementSettings, MeasurementUnit, PowerMode,
    RawSample, Reading, SensorId, SmartSendFilter,
};

// Re-export key port traits
pub use ports::{CalculationPort, DeviceError, EnvironmentalSensorPort, PublishError, ReadingSink};

pub use adapters::{ChannelSink, DirectCalculation, LinearCalculation};
pub use device::{BusId, CycleId, DeviceBinding, DeviceRegistry, FIRST_CYCLE};
pub use poller::{CyclePoller, CycleReport};
pub use sensor::{ConfigError, LogicalSensor, PolledSensor, SensorConfig};
