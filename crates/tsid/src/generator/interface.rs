use alloc::string::{String, ToString};
use core::time::Duration;

use crate::{Layout, RandSource, Result, TimeSource, Tsid, TsidConfig};

/// A minimal interface for generating TSIDs.
///
/// Every implementation upholds the same contract: each call to
/// [`create`](Self::create) returns a TSID strictly greater than every TSID
/// the same instance returned before it, whatever the clock does.
pub trait TsidGenerator<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64>,
{
    /// Creates a factory with the default layout and epoch and a random
    /// counter. Bits of `node` above the node width are dropped.
    fn new(node: u32, time: T, rng: R) -> Self
    where
        Self: Sized;

    /// Creates a factory from a validated [`TsidConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if `node_bits` is above 20, the epoch is later than `time` reads, or
    /// more than 2^42 ms lie between the two.
    fn from_config(config: TsidConfig, time: T, rng: R) -> Result<Self>
    where
        Self: Sized;

    /// Generates the next TSID. Infallible.
    fn create(&self) -> Tsid;

    /// Generates the next TSID and renders it as its 13-character string.
    fn create_string(&self) -> String {
        self.create().to_string()
    }

    /// The node/counter split this factory packs with.
    fn layout(&self) -> Layout;

    /// The node value embedded in every TSID from this factory.
    fn node(&self) -> u64;

    /// The custom epoch, as a duration since the Unix epoch.
    fn epoch(&self) -> Duration;

    /// Unix milliseconds at which `id` was generated, read against this
    /// factory's epoch.
    fn unix_millis(&self, id: Tsid) -> u64 {
        id.unix_millis_with_epoch(self.epoch())
    }

    /// The creation instant of `id`, read against this factory's epoch.
    ///
    /// # Example
    /// ```
    /// use tsid::{BasicTsidFactory, SystemClock, ThreadRandom, TsidConfig, TsidGenerator};
    ///
    /// let config = TsidConfig {
    ///     epoch_millis: 1_000,
    ///     ..TsidConfig::default()
    /// };
    /// let factory = BasicTsidFactory::from_config(config, SystemClock, ThreadRandom).unwrap();
    /// let id = factory.create();
    /// assert_eq!(factory.instant(id), id.instant_with_epoch(factory.epoch()));
    /// ```
    #[cfg(feature = "std")]
    fn instant(&self, id: Tsid) -> std::time::SystemTime {
        id.instant_with_epoch(self.epoch())
    }
}
