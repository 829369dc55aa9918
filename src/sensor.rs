//! Logical sensors
//!
//! A logical sensor reports one quantity (humidity, temperature, pressure or
//! gas resistance) of a physical sensor it shares with other logical sensors.
//! The shared [`DeviceBinding`](crate::device::DeviceBinding) does the
//! physical reads; the logical sensor converts, filters and hands the result
//! to its calculation collaborator.

use core::future::Future;

use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::device::{CycleId, SharedBinding};
use crate::domain::{
    ConversionType, CycleContext, IntervalConfig, IntervalTracker, Reading, SensorId,
    SensorIdentity, SmartSendFilter,
};
use crate::ports::{CalculationPort, EnvironmentalSensorPort};

/// Number of pacing steps after each cycle
pub const POST_CYCLE_STEPS: usize = 10;

/// Length of one pacing step
pub const POST_CYCLE_STEP_MS: u32 = 100;

/// Error type for sensor configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Conversion string names no known conversion
    UnknownConversion,
    /// No conversion was configured
    MissingConversion,
    /// Name or short name exceeds its capacity
    NameTooLong,
    /// Smart threshold is negative or NaN
    InvalidThreshold,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownConversion => write!(f, "unknown conversion type"),
            Self::MissingConversion => write!(f, "no conversion type configured"),
            Self::NameTooLong => write!(f, "sensor name too long"),
            Self::InvalidThreshold => write!(f, "invalid smart threshold"),
        }
    }
}

/// Immutable configuration of one logical sensor
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    pub identity: SensorIdentity,
    pub conversion: ConversionType,
    pub intervals: IntervalConfig,
    /// Drift that forces a send in smart-send mode
    pub smart_threshold: f32,
}

impl SensorConfig {
    pub fn builder<'s>(id: SensorId) -> SensorConfigBuilder<'s> {
        SensorConfigBuilder::new(id)
    }
}

/// Builder for [`SensorConfig`], validating everything on `build`
#[derive(Clone, Debug)]
pub struct SensorConfigBuilder<'s> {
    id: SensorId,
    name: &'s str,
    short_name: &'s str,
    conversion: Option<Result<ConversionType, ConfigError>>,
    intervals: IntervalConfig,
    smart_threshold: f32,
}

impl<'s> SensorConfigBuilder<'s> {
    pub fn new(id: SensorId) -> Self {
        Self {
            id,
            name: "",
            short_name: "",
            conversion: None,
            intervals: IntervalConfig::default(),
            smart_threshold: 0.0,
        }
    }

    pub fn name(mut self, name: &'s str) -> Self {
        self.name = name;
        self
    }

    pub fn short_name(mut self, short_name: &'s str) -> Self {
        self.short_name = short_name;
        self
    }

    pub fn conversion(mut self, conversion: ConversionType) -> Self {
        self.conversion = Some(Ok(conversion));
        self
    }

    /// Set the conversion from its backend name, e.g. `"DIRECT_KOHM"`
    pub fn conversion_name(mut self, name: &str) -> Self {
        self.conversion = Some(
            name.parse::<ConversionType>()
                .map_err(|_| ConfigError::UnknownConversion),
        );
        self
    }

    pub fn intervals(mut self, intervals: IntervalConfig) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn smart_threshold(mut self, threshold: f32) -> Self {
        self.smart_threshold = threshold;
        self
    }

    pub fn build(self) -> Result<SensorConfig, ConfigError> {
        let conversion = self.conversion.ok_or(ConfigError::MissingConversion)??;

        if self.smart_threshold.is_nan() || self.smart_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold);
        }

        let identity = SensorIdentity {
            id: self.id,
            name: String::try_from(self.name).map_err(|_| ConfigError::NameTooLong)?,
            short_name: String::try_from(self.short_name).map_err(|_| ConfigError::NameTooLong)?,
        };

        Ok(SensorConfig {
            identity,
            conversion,
            intervals: self.intervals,
            smart_threshold: self.smart_threshold,
        })
    }
}

/// A sensor driven by the poller, one cycle at a time
pub trait PolledSensor {
    /// Prepare for cycle `cycle_id`; physical reads happen here
    fn pre_cycle(&mut self, cycle_id: CycleId, ctx: &CycleContext) -> impl Future<Output = ()>;

    /// Produce a reading, or `None` when there is nothing to report
    fn read(
        &mut self,
        should_post: bool,
        ctx: &CycleContext,
    ) -> impl Future<Output = Option<Reading>>;

    /// Pace the end of cycle `cycle_id`
    fn post_cycle<T: DelayNs>(
        &mut self,
        cycle_id: CycleId,
        delay: &mut T,
    ) -> impl Future<Output = ()>;

    /// Refresh and post bookkeeping of this sensor
    fn intervals(&mut self) -> &mut IntervalTracker;
}

/// One reported quantity of a shared physical sensor
pub struct LogicalSensor<'a, M: RawMutex, D, C> {
    config: SensorConfig,
    binding: &'a SharedBinding<M, D>,
    calculation: C,
    filter: SmartSendFilter,
    tracker: IntervalTracker,
}

impl<'a, M, D, C> LogicalSensor<'a, M, D, C>
where
    M: RawMutex,
    D: EnvironmentalSensorPort,
    C: CalculationPort,
{
    /// Attach a logical sensor to its physical sensor.
    ///
    /// The first sensor attached to a binding runs discovery.
    pub async fn attach(
        binding: &'a SharedBinding<M, D>,
        config: SensorConfig,
        calculation: C,
        delay: &mut impl DelayNs,
    ) -> Self {
        binding.lock().await.discover(delay).await;

        let tracker = IntervalTracker::new(config.intervals);
        Self {
            config,
            binding,
            calculation,
            filter: SmartSendFilter::new(),
            tracker,
        }
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn filter(&self) -> &SmartSendFilter {
        &self.filter
    }

    pub fn binding(&self) -> &'a SharedBinding<M, D> {
        self.binding
    }

    /// Convert the binding's current sample and decide whether to send it.
    ///
    /// Returns `None` while the device is absent or the system is resetting.
    pub async fn read(&mut self, should_post: bool, ctx: &CycleContext) -> Option<Reading> {
        if ctx.resetting {
            return None;
        }

        let sample = {
            let binding = self.binding.lock().await;
            if !binding.is_present() {
                return None;
            }
            binding.sample()
        };

        let conversion = self.config.conversion;
        let value = conversion.apply(&sample);
        let should_post = self.filter.check(
            value,
            self.config.smart_threshold,
            should_post,
            ctx.power_mode,
        );
        trace!("sensor {}: {} (post: {})", self.config.identity.id.value(), value, should_post);

        Some(self.calculation.calculate(
            &self.config.identity,
            value,
            conversion.unit(),
            should_post,
        ))
    }

    pub async fn pre_cycle(&self, cycle_id: CycleId, ctx: &CycleContext) {
        self.binding.lock().await.pre_cycle(cycle_id, ctx).await;
    }

    /// Give background I/O roughly one second before the next cycle
    pub async fn post_cycle(&self, _cycle_id: CycleId, delay: &mut impl DelayNs) {
        for _ in 0..POST_CYCLE_STEPS {
            yield_now().await;
            delay.delay_ms(POST_CYCLE_STEP_MS).await;
        }
    }
}

impl<'a, M, D, C> PolledSensor for LogicalSensor<'a, M, D, C>
where
    M: RawMutex,
    D: EnvironmentalSensorPort,
    C: CalculationPort,
{
    async fn pre_cycle(&mut self, cycle_id: CycleId, ctx: &CycleContext) {
        LogicalSensor::pre_cycle(self, cycle_id, ctx).await
    }

    async fn read(&mut self, should_post: bool, ctx: &CycleContext) -> Option<Reading> {
        LogicalSensor::read(self, should_post, ctx).await
    }

    async fn post_cycle<T: DelayNs>(&mut self, cycle_id: CycleId, delay: &mut T) {
        LogicalSensor::post_cycle(self, cycle_id, delay).await
    }

    fn intervals(&mut self) -> &mut IntervalTracker {
        &mut self.tracker
    }
}
