/// A trait for random sources that return random integers.
///
/// Factories draw from it to pick a node when none is configured and to reseed
/// the counter at the start of every millisecond. Only the low bits the layout
/// needs are kept, so an implementation may return any value.
///
/// # Example
/// ```
/// use tsid::RandSource;
///
/// struct FixedRand;
/// impl RandSource<u64> for FixedRand {
///     fn rand(&self) -> u64 {
///         1234
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.rand(), 1234);
/// ```
pub trait RandSource<T> {
    /// Returns a random integer.
    fn rand(&self) -> T;
}

impl<T, R> RandSource<T> for &R
where
    R: RandSource<T> + ?Sized,
{
    fn rand(&self) -> T {
        (**self).rand()
    }
}
