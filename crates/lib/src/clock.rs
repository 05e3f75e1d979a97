//! Millisecond time sources for time-bounded iteration.
//!
//! [`Budget`](crate::Budget) reads the time through the [`Clock`] trait, so
//! production code measures real elapsed time with [`SystemClock`] while tests
//! substitute a clock they control.
//!
//! ```
//! use collectica::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let start = clock.now_millis();
//! assert!(clock.elapsed_since(start) < 60_000);
//! ```

use std::fmt::Debug;
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::{AtomicU64, Ordering};

/// A source of millisecond timestamps.
pub trait Clock: Send + Sync + Debug {
    /// Current time as milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;

    /// Milliseconds elapsed since `start`, never negative
    fn elapsed_since(&self, start: u64) -> u64 {
        self.now_millis().saturating_sub(start)
    }
}

/// Wall-clock time from [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Deterministic clock for tests.
///
/// Every read returns the current time and then moves it forward by the step
/// (1 ms unless changed with [`FixedClock::with_step`]). [`FixedClock::hold`]
/// stops the movement until its guard is dropped.
///
/// ```
/// # #[cfg(feature = "testing")]
/// # fn main() {
/// use collectica::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1_000).with_step(10);
/// assert_eq!(clock.now_millis(), 1_000);
/// assert_eq!(clock.now_millis(), 1_010);
///
/// {
///     let _hold = clock.hold();
///     assert_eq!(clock.now_millis(), 1_020);
///     assert_eq!(clock.now_millis(), 1_020);
/// }
/// assert_eq!(clock.now_millis(), 1_020);
/// assert_eq!(clock.get(), 1_030);
/// # }
/// # #[cfg(not(feature = "testing"))]
/// # fn main() {}
/// ```
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicU64,
    step: AtomicU64,
}

/// Guard returned by [`FixedClock::hold`]; dropping it restores the step.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct ClockHold<'a> {
    clock: &'a FixedClock,
    step: u64,
}

#[cfg(any(test, feature = "testing"))]
impl Drop for ClockHold<'_> {
    fn drop(&mut self) {
        self.clock.step.store(self.step, Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// A clock starting at `millis`, advancing 1 ms per read
    pub fn new(millis: u64) -> Self {
        Self {
            millis: AtomicU64::new(millis),
            step: AtomicU64::new(1),
        }
    }

    /// Sets how far each read moves the clock
    pub fn with_step(self, step: u64) -> Self {
        self.step.store(step, Ordering::SeqCst);
        self
    }

    /// Freezes the clock until the returned guard is dropped
    pub fn hold(&self) -> ClockHold<'_> {
        let step = self.step.swap(0, Ordering::SeqCst);
        ClockHold { clock: self, step }
    }

    /// Moves the clock forward by `ms`
    pub fn advance(&self, ms: u64) {
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }

    /// Current time, without advancing
    pub fn get(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        let step = self.step.load(Ordering::SeqCst);
        self.millis.fetch_add(step, Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01 00:00:00 UTC
        Self::new(1_704_067_200_000)
    }
}
