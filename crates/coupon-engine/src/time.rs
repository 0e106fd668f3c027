use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// A trait for time sources that return the current wall-clock instant.
///
/// Both the campaign store (for its start-time gate) and the orchestrator (for
/// its early rejection and for stamping records) read time through this
/// abstraction, so a single clock value can be shared between them and swapped
/// for a controllable one in tests.
///
/// # Example
///
/// ```
/// use chrono::{DateTime, Utc};
/// use coupon_engine::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_time(&self) -> DateTime<Utc> {
///         DateTime::<Utc>::UNIX_EPOCH
///     }
/// }
///
/// assert_eq!(FixedTime.current_time(), DateTime::<Utc>::UNIX_EPOCH);
/// ```
pub trait TimeSource {
    /// Returns the current instant.
    fn current_time(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually driven clock.
///
/// Clones share the same instant, so advancing one handle is observed by every
/// component holding another.
///
/// ```
/// use chrono::{DateTime, Duration, Utc};
/// use coupon_engine::{ManualClock, TimeSource};
///
/// let clock = ManualClock::new(DateTime::<Utc>::UNIX_EPOCH);
/// let shared = clock.clone();
/// clock.advance(Duration::seconds(5));
/// assert_eq!(shared.current_time(), DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(5));
/// ```
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock to `instant`. Going backwards is allowed.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Default for ManualClock {
    /// Starts at the current wall-clock time.
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl TimeSource for ManualClock {
    fn current_time(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
