//! Adapters - concrete implementations of ports
//!
//! - **calculation**: direct and linearly calibrated calculation collaborators
//! - **channel_sink**: hands readings to a posting task over an embassy channel
//!
//! The environmental sensor port is implemented by the board's driver glue.

pub mod calculation;
pub mod channel_sink;

pub use calculation::{DirectCalculation, LinearCalculation};
pub use channel_sink::ChannelSink;
