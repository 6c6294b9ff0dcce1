use core::time::Duration;

/// TSID epoch: Wednesday, January 1, 2020 00:00:00 UTC
pub const TSID_EPOCH: Duration = Duration::from_millis(TSID_EPOCH_MILLIS);

/// [`TSID_EPOCH`] in milliseconds since the Unix epoch.
pub const TSID_EPOCH_MILLIS: u64 = 1_577_836_800_000;

/// Unix epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH: Duration = Duration::from_millis(0);

/// A source of wall-clock time in **milliseconds since the Unix epoch**.
///
/// Factories subtract their configured epoch from this reading, so an
/// implementation never needs to know which epoch is in use. Plug in a fixed
/// or stepped clock in tests to drive the factory deterministically.
///
/// The reading is allowed to go backwards; factories never let the timestamp
/// field follow it.
///
/// # Example
///
/// ```
/// use tsid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_700_000_000_000
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1_700_000_000_000);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> T;
}

impl<T, S> TimeSource<T> for &S
where
    S: TimeSource<T> + ?Sized,
{
    fn current_millis(&self) -> T {
        (**self).current_millis()
    }
}

#[cfg(feature = "std")]
impl<T, S> TimeSource<T> for std::sync::Arc<S>
where
    S: TimeSource<T> + ?Sized,
{
    fn current_millis(&self) -> T {
        (**self).current_millis()
    }
}
