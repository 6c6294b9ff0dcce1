use core::{cell::Cell, time::Duration};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Layout, RandSource, Result, TimeSource, Tsid, TsidConfig, TsidGenerator};

use super::{config::FactoryCore, state::ClockState};

/// A non-concurrent TSID factory suitable for single-threaded environments.
///
/// This factory is lightweight and fast, but **not thread-safe**.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Strictly increasing, even across clock regression
///
/// ## Recommended When
/// - You're in a single-threaded environment (no shared access)
/// - You want the fastest factory
///
/// ## See Also
/// - [`LockTsidFactory`]
/// - [`AtomicTsidFactory`]
///
/// [`LockTsidFactory`]: crate::LockTsidFactory
/// [`AtomicTsidFactory`]: crate::AtomicTsidFactory
pub struct BasicTsidFactory<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64>,
{
    core: FactoryCore<T, R>,
    state: Cell<ClockState>,
}

impl<T, R> BasicTsidFactory<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64>,
{
    /// Creates a new [`BasicTsidFactory`] for `node` with the default
    /// [`Layout`] and epoch.
    ///
    /// # Example
    /// ```
    /// use tsid::{BasicTsidFactory, SystemClock, ThreadRandom};
    ///
    /// let factory = BasicTsidFactory::new(1, SystemClock, ThreadRandom);
    /// let a = factory.create();
    /// let b = factory.create();
    /// assert!(a < b);
    /// ```
    pub fn new(node: u32, time: T, rng: R) -> Self {
        Self::with_layout(node, Layout::default(), time, rng)
    }

    /// Creates a new [`BasicTsidFactory`] with an explicit [`Layout`].
    pub fn with_layout(node: u32, layout: Layout, time: T, rng: R) -> Self {
        Self {
            core: FactoryCore::new(node, layout, time, rng),
            state: Cell::new(ClockState::default()),
        }
    }

    /// Creates a new [`BasicTsidFactory`] from a [`TsidConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration is
    /// rejected.
    ///
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    pub fn from_config(config: TsidConfig, time: T, rng: R) -> Result<Self> {
        Ok(Self {
            core: FactoryCore::from_config(config, time, rng)?,
            state: Cell::new(ClockState::default()),
        })
    }

    /// Generates the next TSID.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn create(&self) -> Tsid {
        let now = self.core.now();
        let state = self.state.get();
        let next = state.advance(now, self.core.layout, || self.core.reseed());
        self.state.set(next);
        self.core.pack(next)
    }
}

impl<T, R> TsidGenerator<T, R> for BasicTsidFactory<T, R>
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
