//! Refresh and post interval tracking
//!
//! A logical sensor is refreshed (read) every `refresh_ms` and its reading is
//! posted every `post_ms`, independently of the smart-send filter which can
//! force extra posts in between.

/// Interval parameters of one logical sensor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalConfig {
    /// How often to read (milliseconds)
    pub refresh_ms: u64,
    /// How often to post regardless of change (milliseconds)
    pub post_ms: u64,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            refresh_ms: 10_000, // 10 seconds
            post_ms: 60_000,    // 1 minute
        }
    }
}

impl IntervalConfig {
    pub const fn new(refresh_ms: u64, post_ms: u64) -> Self {
        Self {
            refresh_ms,
            post_ms,
        }
    }
}

/// Tracks when a sensor was last refreshed and last posted
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntervalTracker {
    config: IntervalConfig,
    last_refresh_ms: Option<u64>,
    last_post_ms: Option<u64>,
}

impl IntervalTracker {
    pub const fn new(config: IntervalConfig) -> Self {
        Self {
            config,
            last_refresh_ms: None,
            last_post_ms: None,
        }
    }

    /// A sensor that was never read is always due
    pub fn refresh_due(&self, now_ms: u64) -> bool {
        Self::elapsed(self.last_refresh_ms, now_ms, self.config.refresh_ms)
    }

    /// A sensor that never posted is always due
    pub fn post_due(&self, now_ms: u64) -> bool {
        Self::elapsed(self.last_post_ms, now_ms, self.config.post_ms)
    }

    pub fn mark_refreshed(&mut self, now_ms: u64) {
        self.last_refresh_ms = Some(now_ms);
    }

    pub fn mark_posted(&mut self, now_ms: u64) {
        self.last_post_ms = Some(now_ms);
    }

    fn elapsed(last: Option<u64>, now_ms: u64, interval_ms: u64) -> bool {
        match last {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= interval_ms,
        }
    }
}
