//! Physical device side: the shared binding and the registry holding it.

pub mod binding;
pub mod registry;

pub use binding::{CycleId, DeviceBinding, Presence, FIRST_CYCLE};
pub use registry::{BusId, DeviceRegistry, RegistryError, SharedBinding};
