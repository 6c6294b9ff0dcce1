use core::time::Duration;

use crate::{ConfigError, Layout, RandSource, Result, TSID_EPOCH_MILLIS, TimeSource, Tsid};

use super::state::ClockState;

/// How the counter starts at every new millisecond.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CounterInit {
    /// Draw from the factory's [`RandSource`]. Hides creation order within a
    /// millisecond and lowers collision odds between factories that share a
    /// node.
    #[default]
    Random,
    /// Start at zero. Deterministic and gives the whole counter range to each
    /// millisecond.
    Zero,
}

/// Factory configuration.
///
/// A plain record; [`from_config`] validates it. Every field has a default:
/// random node, 10 node bits, [`TSID_EPOCH`], random counter.
///
/// The 42-bit timestamp field covers 2^42 ms, about 139 years, from the epoch.
/// An epoch whose range is already used up is rejected.
///
/// # Example
/// ```
/// use tsid::{CounterInit, TsidConfig};
///
/// let config = TsidConfig {
///     node: Some(7),
///     node_bits: 14,
///     counter: CounterInit::Zero,
///     ..TsidConfig::default()
/// };
/// assert_eq!(config.epoch(), tsid::TSID_EPOCH);
/// ```
///
/// [`from_config`]: crate::TsidGenerator::from_config
/// [`TSID_EPOCH`]: crate::TSID_EPOCH
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TsidConfig {
    /// Node discriminator. Bits above `node_bits` are dropped. `None` draws
    /// one from the random source at construction.
    pub node: Option<u32>,
    /// Width of the node field, `0..=20`. The counter gets the other
    /// `22 - node_bits` bits.
    pub node_bits: u8,
    /// Custom epoch in milliseconds since the Unix epoch.
    pub epoch_millis: u64,
    /// Counter reseed strategy.
    pub counter: CounterInit,
}

impl TsidConfig {
    /// The custom epoch as a duration since the Unix epoch.
    pub const fn epoch(&self) -> Duration {
        Duration::from_millis(self.epoch_millis)
    }
}

impl Default for TsidConfig {
    fn default() -> Self {
        Self {
            node: None,
            node_bits: Layout::NODE_1024.node_bits(),
            epoch_millis: TSID_EPOCH_MILLIS,
            counter: CounterInit::Random,
        }
    }
}

/// The immutable half of a factory: everything except the clock state.
#[derive(Debug)]
pub(crate) struct FactoryCore<T, R> {
    pub(crate) node: u64,
    pub(crate) layout: Layout,
    pub(crate) epoch_millis: u64,
    pub(crate) counter: CounterInit,
    pub(crate) time: T,
    pub(crate) rng: R,
}

impl<T, R> FactoryCore<T, R>
where
    T: TimeSource<u64>,
    R: RandSource<u64>,
{
    pub(crate) fn new(node: u32, layout: Layout, time: T, rng: R) -> Self {
        let core = Self {
            node: u64::from(node) & layout.node_mask(),
            layout,
            epoch_millis: TSID_EPOCH_MILLIS,
            counter: CounterInit::Random,
            time,
            rng,
        };
        core.trace_ready();
        core
    }

    pub(crate) fn from_config(config: TsidConfig, time: T, rng: R) -> Result<Self> {
        let layout = Layout::new(config.node_bits)?;

        let epoch_millis = config.epoch_millis;
        let now_millis = time.current_millis();
        if epoch_millis > now_millis {
            return Err(ConfigError::EpochInFuture {
                epoch_millis,
                now_millis,
            }
            .into());
        }
        if now_millis - epoch_millis > Tsid::TIMESTAMP_MASK {
            return Err(ConfigError::EpochTooOld {
                epoch_millis,
                now_millis,
            }
            .into());
        }

        let node = match config.node {
            Some(node) => u64::from(node),
            None => rng.rand(),
        } & layout.node_mask();

        let core = Self {
            node,
            layout,
            epoch_millis,
            counter: config.counter,
            time,
            rng,
        };
        core.trace_ready();
        Ok(core)
    }

    /// Milliseconds since the custom epoch, clamped to the timestamp field.
    #[inline]
    pub(crate) fn now(&self) -> u64 {
        let elapsed = self.time.current_millis().saturating_sub(self.epoch_millis);
        elapsed.min(Tsid::TIMESTAMP_MASK)
    }

    #[inline]
    pub(crate) fn reseed(&self) -> u64 {
        match self.counter {
            CounterInit::Random => self.rng.rand(),
            CounterInit::Zero => 0,
        }
    }

    #[inline]
    pub(crate) fn pack(&self, state: ClockState) -> Tsid {
        self.layout.pack(state.timestamp, self.node, state.counter)
    }

    pub(crate) const fn epoch(&self) -> Duration {
        Duration::from_millis(self.epoch_millis)
    }

    fn trace_ready(&self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            node = self.node,
            node_bits = self.layout.node_bits(),
            counter_bits = self.layout.counter_bits(),
            epoch_millis = self.epoch_millis,
            counter = ?self.counter,
            "tsid factory ready"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, TSID_EPOCH};

    #[derive(Debug)]
    struct FixedTime(u64);
    impl TimeSource<u64> for FixedTime {
        fn current_millis(&self) -> u64 {
            self.0
        }
    }

    #[derive(Debug)]
    struct FixedRand(u64);
    impl RandSource<u64> for FixedRand {
        fn rand(&self) -> u64 {
            self.0
        }
    }

    type Core = FactoryCore<FixedTime, FixedRand>;

    const NOW: u64 = TSID_EPOCH_MILLIS + 1_000;

    fn build(config: TsidConfig, now: u64, rand: u64) -> Result<Core> {
        FactoryCore::from_config(config, FixedTime(now), FixedRand(rand))
    }

    fn build_default(node: u32, layout: Layout, now: u64, rand: u64) -> Core {
        FactoryCore::new(node, layout, FixedTime(now), FixedRand(rand))
    }

    #[test]
    fn default_config() {
        let config = TsidConfig::default();
        assert_eq!(config.node, None);
        assert_eq!(config.node_bits, 10);
        assert_eq!(config.epoch(), TSID_EPOCH);
        assert_eq!(config.counter, CounterInit::Random);
    }

    #[test]
    fn rejects_node_bits_out_of_range() {
        let config = TsidConfig {
            node_bits: 21,
            ..TsidConfig::default()
        };
        let err = build(config, NOW, 0).unwrap_err();
        let expected = ConfigError::NodeBitsOutOfRange { node_bits: 21 };
        assert_eq!(err, Error::InvalidConfiguration(expected));
    }

    #[test]
    fn rejects_epoch_in_the_future() {
        let config = TsidConfig {
            epoch_millis: NOW + 1,
            ..TsidConfig::default()
        };
        let err = build(config, NOW, 0).unwrap_err();
        let expected = ConfigError::EpochInFuture {
            epoch_millis: NOW + 1,
            now_millis: NOW,
        };
        assert_eq!(err, Error::InvalidConfiguration(expected));
    }

    #[test]
    fn rejects_epoch_with_exhausted_range() {
        let config = TsidConfig {
            epoch_millis: 0,
            ..TsidConfig::default()
        };
        assert!(build(config, Tsid::TIMESTAMP_MASK, 0).is_ok());

        let err = build(config, Tsid::TIMESTAMP_MASK + 1, 0).unwrap_err();
        let expected = ConfigError::EpochTooOld {
            epoch_millis: 0,
            now_millis: Tsid::TIMESTAMP_MASK + 1,
        };
        assert_eq!(err, Error::InvalidConfiguration(expected));
    }

    #[test]
    fn masks_wide_node() {
        let config = TsidConfig {
            node: Some(u32::MAX),
            node_bits: 8,
            ..TsidConfig::default()
        };
        assert_eq!(build(config, NOW, 0).unwrap().node, 255);

        let core = build_default(1024 + 3, Layout::NODE_1024, NOW, 0);
        assert_eq!(core.node, 3);
    }

    #[test]
    fn draws_missing_node_from_rng() {
        let config = TsidConfig {
            node_bits: 4,
            ..TsidConfig::default()
        };
        assert_eq!(build(config, NOW, 0xABCD).unwrap().node, 0xD);
    }

    #[test]
    fn now_is_relative_to_epoch_and_clamped() {
        assert_eq!(build_default(0, Layout::default(), NOW, 0).now(), 1_000);
        assert_eq!(build_default(0, Layout::default(), 5, 0).now(), 0);

        let config = TsidConfig {
            epoch_millis: 0,
            ..TsidConfig::default()
        };
        assert!(build(config, u64::MAX, 0).is_err());

        let core = build_default(0, Layout::default(), u64::MAX, 0);
        assert_eq!(core.now(), Tsid::TIMESTAMP_MASK);
    }

    #[test]
    fn reseed_follows_strategy() {
        let config = TsidConfig {
            counter: CounterInit::Zero,
            ..TsidConfig::default()
        };
        assert_eq!(build(config, NOW, 99).unwrap().reseed(), 0);
        assert_eq!(build_default(0, Layout::default(), NOW, 99).reseed(), 99);
    }
}
