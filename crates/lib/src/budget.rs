//! Limits for cooperative, early-exiting iteration.
//!
//! A [`Budget`] bounds an `each_within` traversal by item count and/or
//! wall-clock time. Running out of budget is not an error: the traversal stops
//! and reports `false`, exactly as if the callback had asked to stop.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::clock::{Clock, SystemClock};

/// Item and time limits for `each_within`.
///
/// ```
/// use std::time::Duration;
/// use collectica::{Budget, Sequential};
///
/// let numbers = Sequential::from_values(1..=10);
/// let budget = Budget::new().max_items(3).max_duration(Duration::from_secs(5));
///
/// let mut seen = Vec::new();
/// let completed = numbers.each_within(&budget, |v, _| {
///     seen.push(*v);
///     true
/// });
///
/// assert!(!completed);
/// assert_eq!(seen, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct Budget {
    max_items: Option<usize>,
    max_duration: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl Budget {
    /// An unlimited budget measured with the system clock
    pub fn new() -> Self {
        Self {
            max_items: None,
            max_duration: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Stop before visiting more than `max_items` elements
    pub fn max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Stop once more than `max_duration` has elapsed since the traversal began
    pub fn max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = Some(max_duration);
        self
    }

    /// Measure elapsed time with a different clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Item ceiling, if any
    pub fn item_limit(&self) -> Option<usize> {
        self.max_items
    }

    /// Time limit, if any
    pub fn time_limit(&self) -> Option<Duration> {
        self.max_duration
    }

    /// Feeds entries to `visit` until it returns false or the budget runs out.
    ///
    /// Returns true only if every entry was visited.
    pub(crate) fn drive<E>(
        &self,
        entries: impl IntoIterator<Item = E>,
        mut visit: impl FnMut(E) -> bool,
    ) -> bool {
        let limit_ms = self.max_duration.map(|d| d.as_millis() as u64);
        let started = limit_ms.map(|_| self.clock.now_millis());
        let mut visited = 0usize;

        for entry in entries {
            if let Some(max) = self.max_items {
                if visited >= max {
                    debug!(visited, max_items = max, "each stopped: item limit reached");
                    return false;
                }
            }
            if let (Some(limit), Some(started)) = (limit_ms, started) {
                let elapsed = self.clock.elapsed_since(started);
                if elapsed > limit {
                    debug!(
                        visited,
                        elapsed_ms = elapsed,
                        limit_ms = limit,
                        "each stopped: time limit exceeded"
                    );
                    return false;
                }
            }
            if !visit(entry) {
                debug!(visited, "each stopped by callback");
                return false;
            }
            visited += 1;
        }
        true
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::new()
    }
}
