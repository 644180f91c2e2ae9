use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ControlClock
// ---------------------------------------------------------------------------

/// Integer-nanosecond clock for a fixed-rate control loop.
///
/// Tracks elapsed time as `tick_count * period_nanos` so that repeated
/// ticking never accumulates floating-point drift. Planning calls receive
/// [`secs_f64`](Self::secs_f64) as their absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlClock {
    origin_nanos: u64,
    period_nanos: u64,
    ticks: u64,
}

impl ControlClock {
    /// Create a clock ticking at `rate_hz`, starting at zero.
    ///
    /// A non-positive or non-finite rate yields a clock that never advances.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_rate_hz(rate_hz: f64) -> Self {
        let period_nanos = if rate_hz.is_finite() && rate_hz > 0.0 {
            (1_000_000_000.0 / rate_hz).round() as u64
        } else {
            0
        };
        Self {
            origin_nanos: 0,
            period_nanos,
            ticks: 0,
        }
    }

    /// Create a clock from a tick period.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_period(period: Duration) -> Self {
        Self {
            origin_nanos: 0,
            period_nanos: period.as_nanos() as u64,
            ticks: 0,
        }
    }

    /// Start the clock at `secs` instead of zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_origin_secs(mut self, secs: f64) -> Self {
        self.origin_nanos = (secs.max(0.0) * 1_000_000_000.0).round() as u64;
        self
    }

    /// Advance by one control period.
    pub const fn tick(&mut self) {
        self.ticks = self.ticks.saturating_add(1);
    }

    /// Number of ticks since the origin.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Raw elapsed nanoseconds including the origin.
    #[must_use]
    pub const fn nanos(&self) -> u64 {
        self.origin_nanos
            .saturating_add(self.ticks.saturating_mul(self.period_nanos))
    }

    /// Current time in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn secs_f64(&self) -> f64 {
        self.nanos() as f64 / 1_000_000_000.0
    }

    /// Control period in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn period_secs(&self) -> f64 {
        self.period_nanos as f64 / 1_000_000_000.0
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        Duration::from_nanos(self.period_nanos)
    }

    /// Rewind to the origin.
    pub const fn reset(&mut self) {
        self.ticks = 0;
    }
}

impl fmt::Display for ControlClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.nanos();
        let total_secs = nanos / 1_000_000_000;
        let remaining_nanos = nanos % 1_000_000_000;
        let millis = remaining_nanos / 1_000_000;
        let micros = (remaining_nanos % 1_000_000) / 1_000;
        write!(f, "{total_secs}.{millis:03}{micros:03}s")
    }
}
