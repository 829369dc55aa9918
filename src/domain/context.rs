//! Cycle context
//!
//! Process-wide state the sensors read but never change, passed into every
//! cycle call.

/// Operating power mode of the device
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerMode(pub u8);

impl PowerMode {
    /// Battery-conserving mode, enables smart sending
    pub const SMART_SEND: PowerMode = PowerMode(3);
}

/// Flags for the current polling cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleContext {
    /// The device is resetting; all sensor operations become no-ops
    pub resetting: bool,
    pub power_mode: PowerMode,
}

impl CycleContext {
    pub const fn new(power_mode: PowerMode) -> Self {
        Self {
            resetting: false,
            power_mode,
        }
    }

    /// Same context with the resetting flag set
    pub const fn resetting(self) -> Self {
        Self {
            resetting: true,
            ..self
        }
    }
}
