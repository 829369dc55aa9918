//! Device binding - one physical sensor shared by many logical sensors
//!
//! The binding owns the driver handle, remembers whether discovery succeeded
//! and coordinates polling cycles so that the sensor is read at most once per
//! cycle id, however many logical sensors ask.

use embassy_futures::yield_now;
use embedded_hal_async::delay::DelayNs;

use crate::domain::{CycleContext, MeasurementSettings, RawSample};
use crate::ports::EnvironmentalSensorPort;

/// Polling cycle identifier supplied by the scheduler
pub type CycleId = u32;

/// The cycle id that triggers the warm-up sequence
pub const FIRST_CYCLE: CycleId = 1;

/// Bus addresses probed alternately during discovery
pub const PROBE_ADDRESSES: [u8; 2] = [0x76, 0x77];

/// Total number of probe attempts before giving up
pub const PROBE_ATTEMPTS: usize = 6;

/// Wait after each failed probe
pub const PROBE_RETRY_DELAY_MS: u32 = 500;

/// Discarded readings on the first cycle, primes the gas heater
pub const WARMUP_READINGS: usize = 5;

/// Discovery state of a binding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Presence {
    /// Discovery has not run yet
    Unprobed,
    /// Sensor answered at this address
    Present(u8),
    /// Discovery was exhausted, permanent for the binding's lifetime
    Absent,
}

/// Owned handle to one physical sensor plus its cycle state
pub struct DeviceBinding<D> {
    device: D,
    presence: Presence,
    last_cycle: Option<CycleId>,
    failed_reads: u32,
}

impl<D: EnvironmentalSensorPort> DeviceBinding<D> {
    /// Wrap a driver handle; no bus traffic until [`discover`](Self::discover)
    pub const fn new(device: D) -> Self {
        Self {
            device,
            presence: Presence::Unprobed,
            last_cycle: None,
            failed_reads: 0,
        }
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_present(&self) -> bool {
        matches!(self.presence, Presence::Present(_))
    }

    /// Address the sensor was found at
    pub fn address(&self) -> Option<u8> {
        match self.presence {
            Presence::Present(address) => Some(address),
            _ => None,
        }
    }

    /// Last cycle id processed by [`pre_cycle`](Self::pre_cycle)
    pub fn last_cycle(&self) -> Option<CycleId> {
        self.last_cycle
    }

    /// Cycle readings that failed, warm-up excluded
    pub fn failed_reads(&self) -> u32 {
        self.failed_reads
    }

    /// Values cached by the last successful reading
    pub fn sample(&self) -> RawSample {
        self.device.sample()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Find the sensor on the bus and configure it.
    ///
    /// Runs at most once: later calls return the recorded presence. Probes
    /// [`PROBE_ADDRESSES`] alternately, waiting [`PROBE_RETRY_DELAY_MS`]
    /// after every failure, for [`PROBE_ATTEMPTS`] attempts in total.
    pub async fn discover(&mut self, delay: &mut impl DelayNs) -> Presence {
        if self.presence != Presence::Unprobed {
            return self.presence;
        }

        let mut found = None;
        for attempt in 0..PROBE_ATTEMPTS {
            let address = PROBE_ADDRESSES[attempt % PROBE_ADDRESSES.len()];
            if self.device.begin(address).await.is_ok() {
                found = Some(address);
                break;
            }
            info!("bme680: no sensor at {}, retrying", address);
            delay.delay_ms(PROBE_RETRY_DELAY_MS).await;
        }

        self.presence = match found {
            Some(address) => {
                info!("bme680: found sensor at {}", address);
                let settings = MeasurementSettings::STANDARD;
                match self.device.apply_settings(&settings).await {
                    Ok(()) => debug!(
                        "bme680: settings applied, gas heater {}",
                        settings.gas_enabled()
                    ),
                    Err(_e) => warn!("bme680: failed to apply measurement settings: {}", _e),
                }
                Presence::Present(address)
            }
            None => {
                error!("bme680: could not find a valid sensor, check wiring");
                Presence::Absent
            }
        };
        self.presence
    }

    /// Prepare the sensor for cycle `cycle_id`.
    ///
    /// Repeated calls with the same id are no-ops. The first cycle runs the
    /// warm-up sequence instead of a normal reading. A failed reading is
    /// logged and leaves the previous sample in place. The id is recorded
    /// even when nothing was read, so a cycle is never retried.
    pub async fn pre_cycle(&mut self, cycle_id: CycleId, ctx: &CycleContext) {
        if self.last_cycle == Some(cycle_id) {
            return;
        }

        if !ctx.resetting && self.is_present() {
            if cycle_id == FIRST_CYCLE {
                self.warm_up().await;
            } else if let Err(_e) = self.device.perform_reading().await {
                warn!("bme680: failed to perform reading in cycle {}: {}", cycle_id, _e);
                self.failed_reads = self.failed_reads.wrapping_add(1);
            }
        }

        self.last_cycle = Some(cycle_id);
    }

    async fn warm_up(&mut self) {
        info!("bme680: pre-heating sensor");
        for _ in 0..WARMUP_READINGS {
            let _ = self.device.perform_reading().await;
            yield_now().await;
        }
        info!("bme680: pre-heating done");
    }
}
