//! Cycle poller
//!
//! Drives every logical sensor through one polling pass: all pre-cycles
//! first (so a shared physical sensor is read once), then the reads of
//! sensors whose refresh interval elapsed, then the pacing post-cycles.
//! Readings marked for sending go to the sink.
//!
//! A sensor counts as refreshed only when it produced a reading, and as
//! posted only when the sink accepted it: a cycle skipped while resetting
//! or a refused reading is retried on the next pass.

use embedded_hal_async::delay::DelayNs;

use crate::device::{CycleId, FIRST_CYCLE};
use crate::domain::CycleContext;
use crate::ports::ReadingSink;
use crate::sensor::PolledSensor;

/// Outcome of one polling pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    pub cycle_id: CycleId,
    /// Readings produced by sensors
    pub readings: usize,
    /// Readings accepted by the sink
    pub published: usize,
    /// Readings the sink refused
    pub dropped: usize,
}

pub struct CyclePoller<T, K> {
    delay: T,
    sink: K,
    cycle_id: CycleId,
}

impl<T: DelayNs, K: ReadingSink> CyclePoller<T, K> {
    pub fn new(delay: T, sink: K) -> Self {
        Self {
            delay,
            sink,
            cycle_id: FIRST_CYCLE,
        }
    }

    /// Id the next call to [`run_cycle`](Self::run_cycle) will use
    pub fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn delay(&mut self) -> &mut T {
        &mut self.delay
    }

    /// Run one polling pass over `sensors` at time `now_ms`
    pub async fn run_cycle<S: PolledSensor>(
        &mut self,
        sensors: &mut [S],
        ctx: &CycleContext,
        now_ms: u64,
    ) -> CycleReport {
        let cycle_id = self.cycle_id;
        let mut report = CycleReport {
            cycle_id,
            ..CycleReport::default()
        };

        for sensor in sensors.iter_mut() {
            sensor.pre_cycle(cycle_id, ctx).await;
        }

        for sensor in sensors.iter_mut() {
            if !sensor.intervals().refresh_due(now_ms) {
                continue;
            }
            let post_due = sensor.intervals().post_due(now_ms);

            // a skipped read leaves the sensor due
            let Some(reading) = sensor.read(post_due, ctx).await else {
                continue;
            };
            sensor.intervals().mark_refreshed(now_ms);
            report.readings += 1;

            if !reading.should_post {
                continue;
            }

            match self.sink.publish(reading).await {
                Ok(()) => {
                    sensor.intervals().mark_posted(now_ms);
                    report.published += 1;
                }
                Err(_e) => {
                    warn!("poller: dropped reading in cycle {}: {}", cycle_id, _e);
                    report.dropped += 1;
                }
            }
        }

        for sensor in sensors.iter_mut() {
            sensor.post_cycle(cycle_id, &mut self.delay).await;
        }

        self.cycle_id = next_cycle(cycle_id);
        debug!(
            "poller: cycle {} done, {} readings, {} published",
            cycle_id, report.readings, report.published
        );
        report
    }
}

/// Cycle ids never return to the warm-up id after wrapping
fn next_cycle(cycle_id: CycleId) -> CycleId {
    match cycle_id.wrapping_add(1) {
        0 | FIRST_CYCLE => FIRST_CYCLE + 1,
        next => next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::DirectCalculation;
    use crate::device::{DeviceBinding, SharedBinding};
    use crate::domain::{IntervalConfig, PowerMode, RawSample, SensorId};
    use crate::ports::mock::{MockDelay, MockSensor, MockSink, SAMPLE};
    use crate::sensor::{LogicalSensor, SensorConfig};
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::mutex::Mutex;

    type Shared = SharedBinding<NoopRawMutex, MockSensor>;
    type Sensor<'a> = LogicalSensor<'a, NoopRawMutex, MockSensor, DirectCalculation>;

    const NORMAL: CycleContext = CycleContext::new(PowerMode(0));

    fn sensor<'a>(binding: &'a Shared, id: u32, conversion: &str) -> Sensor<'a> {
        let config = SensorConfig::builder(SensorId(id))
            .name("Greenhouse")
            .short_name("GH")
            .conversion_name(conversion)
            .intervals(IntervalConfig::new(1_000, 10_000))
            .smart_threshold(0.5)
            .build()
            .unwrap();
        block_on(LogicalSensor::attach(
            binding,
            config,
            DirectCalculation,
            &mut MockDelay::default(),
        ))
    }

    #[test]
    fn test_next_cycle_skips_warm_up_id() {
        assert_eq!(next_cycle(1), 2);
        assert_eq!(next_cycle(41), 42);
        assert_eq!(next_cycle(u32::MAX), 2);
    }

    #[test]
    fn test_first_cycle_warms_up_and_posts() {
        let binding: Shared = Mutex::new(DeviceBinding::new(MockSensor::at(0x76)));
        let mut sensors = [
            sensor(&binding, 1, "DIRECT_CELSIUS"),
            sensor(&binding, 2, "DIRECT_PERCENT"),
            sensor(&binding, 3, "DIRECT_KOHM"),
        ];
        let mut poller = CyclePoller::new(MockDelay::default(), MockSink::default());

        let report = block_on(poller.run_cycle(&mut sensors, &NORMAL, 0));

        assert_eq!(report.cycle_id, FIRST_CYCLE);
        assert_eq!(report.readings, 3);
        assert_eq!(report.published, 3);
        assert_eq!(block_on(binding.lock()).device().reads, 5);
        assert_eq!(poller.sink().published[2].value, 125.0);
        // one second of pacing per sensor
        assert_eq!(poller.delay().total_ms(), 3000);
        assert_eq!(poller.cycle_id(), 2);
    }

    #[test]
    fn test_intervals_gate_reads_and_posts() {
        let binding: Shared = Mutex::new(DeviceBinding::new(MockSensor::at(0x76)));
        let mut sensors = [sensor(&binding, 1, "DIRECT_CELSIUS")];
        let mut poller = CyclePoller::new(MockDelay::default(), MockSink::default());

        block_on(poller.run_cycle(&mut sensors, &NORMAL, 0));

        // refresh not due yet
        let report = block_on(poller.run_cycle(&mut sensors, &NORMAL, 500));
        assert_eq!(report.readings, 0);
        assert_eq!(block_on(binding.lock()).device().reads, 6);

        // refreshed, but not posted
        let report = block_on(poller.run_cycle(&mut sensors, &NORMAL, 1_000));
        assert_eq!((report.readings, report.published), (1, 0));

        // post interval elapsed
        let report = block_on(poller.run_cycle(&mut sensors, &NORMAL, 10_000));
        assert_eq!((report.readings, report.published), (1, 1));
        assert_eq!(poller.sink().published.len(), 2);
    }

    #[test]
    fn test_smart_send_between_posts() {
        let mut device = MockSensor::at(0x76);
        let warm_up = [SAMPLE; 5];
        device.next_samples = warm_up
            .into_iter()
            .chain([22.7, 23.5].map(|t| RawSample { temperature_c: t, ..SAMPLE }))
            .collect();
        let binding: Shared = Mutex::new(DeviceBinding::new(device));
        let mut sensors = [sensor(&binding, 1, "DIRECT_CELSIUS")];
        let mut poller = CyclePoller::new(MockDelay::default(), MockSink::default());
        let smart = CycleContext::new(PowerMode::SMART_SEND);

        // first post sets the baseline at 22.5
        let report = block_on(poller.run_cycle(&mut sensors, &smart, 0));
        assert_eq!(report.published, 1);

        // 0.2 of drift stays within the threshold
        let report = block_on(poller.run_cycle(&mut sensors, &smart, 1_000));
        assert_eq!((report.readings, report.published), (1, 0));

        // 1.0 of drift is posted before the post interval
        let report = block_on(poller.run_cycle(&mut sensors, &smart, 2_000));
        assert_eq!(report.published, 1);
        assert_eq!(poller.sink().published[1].value, 23.5);
    }

    #[test]
    fn test_refused_readings_are_counted() {
        let binding: Shared = Mutex::new(DeviceBinding::new(MockSensor::at(0x76)));
        let mut sensors = [sensor(&binding, 1, "DIRECT_OHM"), sensor(&binding, 2, "DIRECT_KOHM")];
        let sink = MockSink {
            refuse: true,
            ..MockSink::default()
        };
        let mut poller = CyclePoller::new(MockDelay::default(), sink);

        let report = block_on(poller.run_cycle(&mut sensors, &NORMAL, 0));

        assert_eq!(report.readings, 2);
        assert_eq!(report.published, 0);
        assert_eq!(report.dropped, 2);
    }

    #[test]
    fn test_refused_reading_is_retried_next_cycle() {
        let binding: Shared = Mutex::new(DeviceBinding::new(MockSensor::at(0x76)));
        let mut sensors = [sensor(&binding, 1, "DIRECT_OHM")];
        let refusing = MockSink {
            refuse: true,
            ..MockSink::default()
        };
        let mut poller = CyclePoller::new(MockDelay::default(), refusing);

        let report = block_on(poller.run_cycle(&mut sensors, &NORMAL, 0));
        assert_eq!(report.dropped, 1);

        // sink recovers well before the post interval elapses
        poller.sink_mut().refuse = false;
        let report = block_on(poller.run_cycle(&mut sensors, &NORMAL, 1_000));
        assert_eq!((report.readings, report.published), (1, 1));
        assert_eq!(poller.sink().published[0].value, 125_000.0);

        // accepted, so the post interval restarts
        let report = block_on(poller.run_cycle(&mut sensors, &NORMAL, 2_000));
        assert_eq!((report.readings, report.published), (1, 0));
    }

    #[test]
    fn test_absent_device_produces_nothing() {
        let binding: Shared = Mutex::new(DeviceBinding::new(MockSensor::absent()));
        let mut sensors = [sensor(&binding, 1, "DIRECT_CELSIUS")];
        let mut poller = CyclePoller::new(MockDelay::default(), MockSink::default());

        for now in [0, 1_000, 2_000] {
            let report = block_on(poller.run_cycle(&mut sensors, &NORMAL, now));
            assert_eq!(report.readings, 0);
        }
        assert!(poller.sink().published.is_empty());
    }

    #[test]
    fn test_resetting_skips_everything_but_pacing() {
        let binding: Shared = Mutex::new(DeviceBinding::new(MockSensor::at(0x76)));
        let mut sensors = [sensor(&binding, 1, "DIRECT_CELSIUS")];
        let mut poller = CyclePoller::new(MockDelay::default(), MockSink::default());

        let report = block_on(poller.run_cycle(&mut sensors, &NORMAL.resetting(), 0));

        assert_eq!(report.readings, 0);
        assert_eq!(block_on(binding.lock()).device().reads, 0);
        assert_eq!(poller.delay().total_ms(), 1000);
    }

    #[test]
    fn test_reset_does_not_consume_refresh_interval() {
        let binding: Shared = Mutex::new(DeviceBinding::new(MockSensor::at(0x76)));
        let mut sensors = [sensor(&binding, 1, "DIRECT_CELSIUS")];
        let mut poller = CyclePoller::new(MockDelay::default(), MockSink::default());

        block_on(poller.run_cycle(&mut sensors, &NORMAL, 0));
        let report = block_on(poller.run_cycle(&mut sensors, &NORMAL.resetting(), 1_000));
        assert_eq!(report.readings, 0);

        // reset cleared: the overdue refresh happens right away
        let report = block_on(poller.run_cycle(&mut sensors, &NORMAL, 1_200));
        assert_eq!(report.readings, 1);
    }
}
