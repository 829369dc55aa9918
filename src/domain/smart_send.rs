//! Smart-send hysteresis filter
//!
//! In the battery-saving power mode a reading that would not otherwise be
//! posted is still sent when it has drifted more than a threshold away from
//! the last value that was actually sent. In every other mode the filter is
//! inert.

use super::context::PowerMode;

/// Per-sensor hysteresis state
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmartSendFilter {
    /// Last value marked for sending, NaN until one exists
    last_posted: f32,
}

impl SmartSendFilter {
    pub const fn new() -> Self {
        Self {
            last_posted: f32::NAN,
        }
    }

    /// Last value that was marked for sending, if any
    pub fn last_posted(&self) -> Option<f32> {
        if self.last_posted.is_nan() {
            None
        } else {
            Some(self.last_posted)
        }
    }

    /// Decide whether `value` should be posted.
    ///
    /// Returns `should_post` unchanged unless `mode` is
    /// [`PowerMode::SMART_SEND`]. In that mode a `false` intent is overridden
    /// when `value` lies strictly more than `threshold` away from the last
    /// posted value, and every `true` outcome becomes the new baseline.
    ///
    /// Without a baseline a `false` intent stays `false` and sets nothing.
    pub fn check(&mut self, value: f32, threshold: f32, should_post: bool, mode: PowerMode) -> bool {
        if mode != PowerMode::SMART_SEND {
            return should_post;
        }

        let mut should_post = should_post;

        if !should_post && !self.last_posted.is_nan() {
            let delta = self.last_posted - value;
            if delta > threshold || delta < -threshold {
                should_post = true;
            }
        }

        if should_post {
            self.last_posted = value;
        }

        should_post
    }
}

impl Default for SmartSendFilter {
    fn default() -> Self {
        Self::new()
    }
}
