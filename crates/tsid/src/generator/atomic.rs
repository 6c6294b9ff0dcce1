use core::time::Duration;

use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Layout, RandSource, Result, TimeSource, Tsid, TsidConfig, TsidGenerator};

use super::{config::FactoryCore, state::ClockState};

/// A lock-free TSID factory suitable for multi-threaded environments.
///
/// The `(timestamp, counter)` state is packed into one [`AtomicU64`] and
/// advanced with a compare-and-exchange loop.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Strictly increasing, even across clock regression
/// - ❌ Not fair: a thread can lose the race several times in a row
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Fair access is sacrificed for higher throughput
///
/// ## See Also
/// - [`BasicTsidFactory`]
/// - [`LockTsidFactory`]
///
/// [`BasicTsidFactory`]: crate::BasicTsidFactory
/// [`LockTsidFactory`]: crate::LockTsidFactory
pub struct AtomicTsidFactory<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64>,
{
    core: FactoryCore<T, R>,
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    state: AtomicU64,
}

impl<T, R> AtomicTsidFactory<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64>,
{
    /// Creates a new [`AtomicTsidFactory`] for `node` with the default
    /// [`Layout`] and epoch.
    pub fn new(node: u32, time: T, rng: R) -> Self {
        Self::with_layout(node, Layout::default(), time, rng)
    }

    /// Creates a new [`AtomicTsidFactory`] with an explicit [`Layout`].
    ///
    /// # Example
    /// ```
    /// use tsid::{AtomicTsidFactory, Layout, SystemClock, ThreadRandom};
    ///
    /// let layout = Layout::NODE_256;
    /// let factory = AtomicTsidFactory::with_layout(3, layout, SystemClock, ThreadRandom);
    /// let id = factory.create();
    /// assert_eq!(layout.node(id), 3);
    /// ```
    pub fn with_layout(node: u32, layout: Layout, time: T, rng: R) -> Self {
        Self::from_core(FactoryCore::new(node, layout, time, rng))
    }

    /// Creates a new [`AtomicTsidFactory`] from a [`TsidConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration is
    /// rejected.
    ///
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    pub fn from_config(config: TsidConfig, time: T, rng: R) -> Result<Self> {
        Ok(Self::from_core(FactoryCore::from_config(config, time, rng)?))
    }

    fn from_core(core: FactoryCore<T, R>) -> Self {
        let state = AtomicU64::new(ClockState::default().to_raw());
        Self {
            core,
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(state),
            #[cfg(not(feature = "cache-padded"))]
            state,
        }
    }

    /// Generates the next TSID.
    ///
    /// Retries until its compare-and-exchange wins. Every retry recomputes the
    /// next state from the value that beat it, so the published states form a
    /// strictly increasing chain.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn create(&self) -> Tsid {
        let now = self.core.now();
        let mut current = self.state.load(Ordering::Relaxed);
        loop {
            let state = ClockState::from_raw(current);
            let next = state.advance(now, self.core.layout, || self.core.reseed());
            match self.state.compare_exchange_weak(
                current,
                next.to_raw(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return self.core.pack(next),
                Err(actual) => {
                    current = actual;
                    core::hint::spin_loop();
                }
            }
        }
    }
}

impl<T, R> TsidGenerator<T, R> for AtomicTsidFactory<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64>,
{
    fn new(node: u32, time: T, rng: R) -> Self {
        Self::new(node, time, rng)
    }

    fn from_config(config: TsidConfig, time: T, rng: R) -> Result<Self> {
        Self::from_config(config, time, rng)
    }

    fn create(&self) -> Tsid {
        self.create()
    }

    fn layout(&self) -> Layout {
        self.core.layout
    }

    fn node(&self) -> u64 {
        self.core.node
    }

    fn epoch(&self) -> Duration {
        self.core.epoch()
    }
}
