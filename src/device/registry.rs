//! Device registry - at most one binding per bus
//!
//! Logical sensors that read from the same physical sensor look their binding
//! up by bus identity. The first lookup for a bus creates the binding; later
//! lookups share it. In firmware the registry is a `static`, so bindings live
//! until restart.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::once_lock::OnceLock;

use super::binding::DeviceBinding;
use crate::ports::EnvironmentalSensorPort;

/// Identifies a sensor bus by its data and clock pins
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusId {
    pub sda: u8,
    pub scl: u8,
}

impl BusId {
    pub const fn new(sda: u8, scl: u8) -> Self {
        Self { sda, scl }
    }
}

/// Error type for registry operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Every slot already holds a binding for another bus
    Full,
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "device registry full"),
        }
    }
}

/// Shared, lockable binding as handed to logical sensors
pub type SharedBinding<M, D> = Mutex<M, DeviceBinding<D>>;

struct Entry<M: RawMutex, D> {
    bus: BusId,
    binding: SharedBinding<M, D>,
}

/// Holds up to `N` device bindings keyed by [`BusId`]
pub struct DeviceRegistry<M: RawMutex, D, const N: usize> {
    slots: [OnceLock<Entry<M, D>>; N],
}

impl<M: RawMutex, D: EnvironmentalSensorPort, const N: usize> DeviceRegistry<M, D, N> {
    pub const fn new() -> Self {
        Self {
            slots: [const { OnceLock::new() }; N],
        }
    }

    /// Binding for `bus`, created from `make_device` on first use.
    ///
    /// The bus is checked on whatever entry a slot ends up holding, so a slot
    /// filled by another context in the meantime is skipped.
    pub fn bind(
        &self,
        bus: BusId,
        mut make_device: impl FnMut() -> D,
    ) -> Result<&SharedBinding<M, D>, RegistryError> {
        for slot in &self.slots {
            let entry = slot.get_or_init(|| {
                debug!("registry: new binding for bus {}/{}", bus.sda, bus.scl);
                Entry {
                    bus,
                    binding: Mutex::new(DeviceBinding::new(make_device())),
                }
            });
            if entry.bus == bus {
                return Ok(&entry.binding);
            }
        }
        Err(RegistryError::Full)
    }

    /// Existing binding for `bus`, without creating one
    pub fn get(&self, bus: BusId) -> Option<&SharedBinding<M, D>> {
        self.slots
            .iter()
            .filter_map(OnceLock::try_get)
            .find(|entry| entry.bus == bus)
            .map(|entry| &entry.binding)
    }

    /// Number of bindings created so far
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.try_get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: RawMutex, D: EnvironmentalSensorPort, const N: usize> Default for DeviceRegistry<M, D, N> {
    fn default() -> Self {
        Self::new()
    }
}
