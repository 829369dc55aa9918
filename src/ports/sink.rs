//! Reading sink port - where send-worthy readings go
//!
//! The sink is the hand-off to the data pipeline (network posting, storage,
//! ...). Sensors never see it; the poller publishes into it.

use crate::domain::Reading;
use core::future::Future;

/// Error type for publishing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PublishError {
    /// The downstream queue has no room
    QueueFull,
    /// The downstream consumer is gone
    Disconnected,
}

impl core::fmt::Display for PublishError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::QueueFull => write!(f, "reading queue full"),
            Self::Disconnected => write!(f, "reading consumer disconnected"),
        }
    }
}

/// Port for forwarding readings upstream
pub trait ReadingSink {
    fn publish(&mut self, reading: Reading) -> impl Future<Output = Result<(), PublishError>>;
}
