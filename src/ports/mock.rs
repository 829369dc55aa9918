//! Test doubles for the ports.

use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use super::environmental::{DeviceError, EnvironmentalSensorPort};
use super::sink::{PublishError, ReadingSink};
use crate::domain::{MeasurementSettings, RawSample, Reading};

pub const SAMPLE: RawSample = RawSample {
    temperature_c: 22.5,
    humidity_pct: 55.2,
    pressure_pa: 101325.0,
    gas_resistance_ohm: 125000.0,
};

/// Scripted sensor. Answers `begin` only at `present_at`, and plays back
/// `next_samples` one per successful reading.
pub struct MockSensor {
    pub present_at: Option<u8>,
    pub fail_reads: bool,
    pub fail_settings: bool,
    pub probes: Vec<u8>,
    pub applied: Vec<MeasurementSettings>,
    pub reads: usize,
    pub next_samples: Vec<RawSample>,
    pub current: RawSample,
}

impl MockSensor {
    pub fn at(address: u8) -> Self {
        Self {
            present_at: Some(address),
            fail_reads: false,
            fail_settings: false,
            probes: Vec::new(),
            applied: Vec::new(),
            reads: 0,
            next_samples: Vec::new(),
            current: SAMPLE,
        }
    }

    pub fn absent() -> Self {
        Self {
            present_at: None,
            ..Self::at(0)
        }
    }
}

impl EnvironmentalSensorPort for MockSensor {
    async fn begin(&mut self, address: u8) -> Result<(), DeviceError> {
        self.probes.push(address);
        if self.present_at == Some(address) {
            Ok(())
        } else {
            Err(DeviceError::NotFound)
        }
    }

    async fn apply_settings(&mut self, settings: &MeasurementSettings) -> Result<(), DeviceError> {
        if self.fail_settings {
            return Err(DeviceError::Bus);
        }
        self.applied.push(*settings);
        Ok(())
    }

    async fn perform_reading(&mut self) -> Result<(), DeviceError> {
        self.reads += 1;
        if self.fail_reads {
            return Err(DeviceError::ReadFailed);
        }
        if !self.next_samples.is_empty() {
            self.current = self.next_samples.remove(0);
        }
        Ok(())
    }

    fn sample(&self) -> RawSample {
        self.current
    }
}

/// Records every requested delay instead of waiting
#[derive(Default)]
pub struct MockDelay {
    pub delays_ms: Vec<u32>,
}

impl MockDelay {
    pub fn total_ms(&self) -> u32 {
        self.delays_ms.iter().sum()
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.delays_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

/// Collects published readings, optionally refusing them
#[derive(Default)]
pub struct MockSink {
    pub published: Vec<Reading>,
    pub refuse: bool,
}

impl ReadingSink for MockSink {
    async fn publish(&mut self, reading: Reading) -> Result<(), PublishError> {
        if self.refuse {
            return Err(PublishError::Disconnected);
        }
        self.published.push(reading);
        Ok(())
    }
}
