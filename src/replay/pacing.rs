//! Effective delay policy.

use crate::session::{Config, Timing};

/// Decides how long each record waits before it is played.
///
/// Built from a session's [`Config`] and optionally overridden by the player
/// (`real_timing`, `speed_factor`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    frame_delay: Timing,
    max_idle_time: Timing,
    real_timing: bool,
    speed_factor: f64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Pacing {
    pub fn new(frame_delay: Timing, max_idle_time: Timing) -> Self {
        Self {
            frame_delay,
            max_idle_time,
            real_timing: false,
            speed_factor: 1.0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.frame_delay, config.max_idle_time)
    }

    /// Play every record with exactly its recorded delay.
    pub fn recorded() -> Self {
        Self::new(Timing::Auto, Timing::Auto).real_timing(true)
    }

    /// Ignore `frameDelay` and `maxIdleTime` and use recorded delays.
    pub fn real_timing(mut self, enabled: bool) -> Self {
        self.real_timing = enabled;
        self
    }

    /// Multiply every effective delay by `factor`.
    ///
    /// Values below 1 speed playback up, values above slow it down. Negative
    /// or NaN factors are treated as 0.
    pub fn speed_factor(mut self, factor: f64) -> Self {
        self.speed_factor = factor.max(0.0);
        self
    }

    pub fn is_real_timing(&self) -> bool {
        self.real_timing
    }

    pub fn factor(&self) -> f64 {
        self.speed_factor
    }

    /// Delay to wait before a record whose recorded delay is `recorded` ms.
    pub fn effective_delay(&self, recorded: u64) -> u64 {
        let delay = if self.real_timing {
            recorded
        } else {
            match (self.frame_delay, self.max_idle_time) {
                (Timing::Millis(fixed), _) => fixed,
                (Timing::Auto, Timing::Millis(cap)) => recorded.min(cap),
                (Timing::Auto, Timing::Auto) => recorded,
            }
        };
        self.scale(delay)
    }

    fn scale(&self, delay: u64) -> u64 {
        if self.speed_factor == 1.0 {
            delay
        } else {
            // `as` saturates, so huge products clamp to u64::MAX
            (delay as f64 * self.speed_factor).round() as u64
        }
    }
}
