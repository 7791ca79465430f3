use chrono::{DateTime, Utc};

/// A source of wall-clock timestamps for stamping created locations.
///
/// This abstraction allows plugging a fixed clock in tests.
///
/// # Example
///
/// ```
/// use chrono::{DateTime, TimeZone, Utc};
/// use stowage::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn now(&self) -> DateTime<Utc> {
///         Utc.timestamp_opt(1_700_000_000, 0).unwrap()
///     }
/// }
///
/// assert_eq!(FixedTime.now().timestamp(), 1_700_000_000);
/// ```
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
