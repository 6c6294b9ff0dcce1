use core::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Layout, RandSource, Result, TimeSource, Tsid, TsidConfig, TsidGenerator};

use super::{config::FactoryCore, mutex::Mutex, state::ClockState};

#[cfg(not(feature = "parking-lot"))]
use super::mutex::PoisonError;

/// A lock-based TSID factory suitable for multi-threaded environments.
///
/// The clock state sits behind a [`Mutex`] (`std`, or `parking_lot` with the
/// `parking-lot` feature). The lock is held only for the state transition; the
/// clock is read before taking it.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Strictly increasing, even across clock regression
/// - ✅ Fair under contention
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Fair access across threads is important
/// - Your target doesn't support 64-bit atomics
///
/// ## See Also
/// - [`BasicTsidFactory`]
/// - [`AtomicTsidFactory`]
///
/// [`BasicTsidFactory`]: crate::BasicTsidFactory
/// [`AtomicTsidFactory`]: crate::AtomicTsidFactory
pub struct LockTsidFactory<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64>,
{
    core: FactoryCore<T, R>,
    #[cfg(feature = "cache-padded")]
    state: crossbeam_utils::CachePadded<Mutex<ClockState>>,
    #[cfg(not(feature = "cache-padded"))]
    state: Mutex<ClockState>,
}

impl<T, R> LockTsidFactory<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64>,
{
    /// Creates a new [`LockTsidFactory`] for `node` with the default
    /// [`Layout`] and epoch.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use tsid::{LockTsidFactory, SystemClock, ThreadRandom, TsidGenerator};
    ///
    /// let factory = Arc::new(LockTsidFactory::new(7, SystemClock, ThreadRandom));
    ///
    /// let handles: Vec<_> = (0..4)
    ///     .map(|_| {
    ///         let factory = Arc::clone(&factory);
    ///         std::thread::spawn(move || factory.create())
    ///     })
    ///     .collect();
    ///
    /// for handle in handles {
    ///     assert_eq!(factory.layout().node(handle.join().unwrap()), 7);
    /// }
    /// ```
    pub fn new(node: u32, time: T, rng: R) -> Self {
        Self::with_layout(node, Layout::default(), time, rng)
    }

    /// Creates a new [`LockTsidFactory`] with an explicit [`Layout`].
    pub fn with_layout(node: u32, layout: Layout, time: T, rng: R) -> Self {
        Self::from_core(FactoryCore::new(node, layout, time, rng))
    }

    /// Creates a new [`LockTsidFactory`] from a [`TsidConfig`].
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
        let state = Mutex::new(ClockState::default());
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
    /// A poisoned lock is recovered: the state is replaced as a whole, so a
    /// panic elsewhere cannot leave it half-written.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn create(&self) -> Tsid {
        let now = self.core.now();

        #[cfg(feature = "parking-lot")]
        let mut state = self.state.lock();
        #[cfg(not(feature = "parking-lot"))]
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        *state = state.advance(now, self.core.layout, || self.core.reseed());
        self.core.pack(*state)
    }
}

impl<T, R> TsidGenerator<T, R> for LockTsidFactory<T, R>
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
