//! Test utilities for the rideshare crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`), so
//! the module is compiled unconditionally.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;

/// Clock that advances by a fixed step on every reading.
///
/// Successive entities created through the services get strictly increasing
/// timestamps, so ordering assertions do not depend on wall-clock speed. A
/// zero step gives a frozen clock.
///
/// # Examples
///
/// ```rust
/// use chrono::{Duration, TimeZone, Utc};
/// use mockable::Clock;
/// use rideshare::test_support::SteppingClock;
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).single().expect("valid timestamp");
/// let clock = SteppingClock::new(start, Duration::minutes(1));
/// assert_eq!(clock.utc(), start);
/// assert_eq!(clock.utc(), start + Duration::minutes(1));
/// ```
#[derive(Debug)]
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    /// Start at `start`, advancing by `step` after each reading.
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }

    /// Clock that always reports `at`.
    pub fn frozen(at: DateTime<Utc>) -> Self {
        Self::new(at, Duration::zero())
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
        let now = *next;
        *next = now + self.step;
        now
    }
}
