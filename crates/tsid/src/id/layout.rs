use crate::{ConfigError, Result, Tsid};

/// The split of a TSID's low 22 bits between node and counter.
///
/// The timestamp always takes the top 42 bits. The remaining 22 bits are
/// shared: `node_bits` for the node discriminator and `22 - node_bits` for the
/// per-millisecond counter.
///
/// ```text
///  Bit Index:  63             22 21                   C C-1               0
///              +----------------+----------------------+-------------------+
///  Field:      | timestamp (42) | node (node_bits)     | counter (22 - n)  |
///              +----------------+----------------------+-------------------+
///              |<----------- MSB -------- 64 bits -------- LSB ----------->|
/// ```
///
/// Where `C` is [`Layout::counter_bits`].
///
/// # Example
///
/// ```
/// use tsid::Layout;
///
/// let layout = Layout::new(14).unwrap();
/// assert_eq!(layout.counter_bits(), 8);
///
/// let id = layout.pack(1_000, 3, 255);
/// assert_eq!(id.timestamp(), 1_000);
/// assert_eq!(layout.node(id), 3);
/// assert_eq!(layout.counter(id), 255);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Layout {
    node_bits: u8,
}

impl Layout {
    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u8 = 42;

    /// Width shared by the node and counter fields.
    pub const RANDOM_BITS: u8 = 22;

    /// Largest accepted node width.
    pub const MAX_NODE_BITS: u8 = 20;

    /// 8 node bits, 14 counter bits: 256 nodes, 16384 IDs per millisecond.
    pub const NODE_256: Self = Self { node_bits: 8 };

    /// 10 node bits, 12 counter bits: 1024 nodes, 4096 IDs per millisecond.
    pub const NODE_1024: Self = Self { node_bits: 10 };

    /// 12 node bits, 10 counter bits: 4096 nodes, 1024 IDs per millisecond.
    pub const NODE_4096: Self = Self { node_bits: 12 };

    /// Creates a layout with `node_bits` bits for the node.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NodeBitsOutOfRange`] if `node_bits` exceeds
    /// [`Self::MAX_NODE_BITS`].
    pub const fn new(node_bits: u8) -> Result<Self> {
        if node_bits > Self::MAX_NODE_BITS {
            return Err(crate::Error::InvalidConfiguration(
                ConfigError::NodeBitsOutOfRange { node_bits },
            ));
        }
        Ok(Self { node_bits })
    }

    /// Width of the node field.
    pub const fn node_bits(&self) -> u8 {
        self.node_bits
    }

    /// Width of the counter field, `22 - node_bits`.
    pub const fn counter_bits(&self) -> u8 {
        Self::RANDOM_BITS - self.node_bits
    }

    /// Width of the timestamp field. Always 42.
    pub const fn timestamp_bits(&self) -> u8 {
        Self::TIMESTAMP_BITS
    }

    /// Bitmask for the node field, before shifting into place.
    pub const fn node_mask(&self) -> u64 {
        (1 << self.node_bits) - 1
    }

    /// Bitmask for the counter field (bits 0 through `counter_bits - 1`).
    pub const fn counter_mask(&self) -> u64 {
        (1 << self.counter_bits()) - 1
    }

    /// Largest node value this layout can hold.
    pub const fn max_node(&self) -> u64 {
        self.node_mask()
    }

    /// Largest counter value this layout can hold.
    pub const fn max_counter(&self) -> u64 {
        self.counter_mask()
    }

    /// Packs the three fields into a [`Tsid`].
    ///
    /// Each field is masked to its width; out-of-range bits are dropped rather
    /// than spilling into a neighbour.
    pub const fn pack(&self, timestamp: u64, node: u64, counter: u64) -> Tsid {
        let node = (node & self.node_mask()) << self.counter_bits();
        let counter = counter & self.counter_mask();
        Tsid::from_components(timestamp, node | counter)
    }

    /// Extracts the node field.
    pub const fn node(&self, id: Tsid) -> u64 {
        (id.random() >> self.counter_bits()) & self.node_mask()
    }

    /// Extracts the counter field.
    pub const fn counter(&self, id: Tsid) -> u64 {
        id.random() & self.counter_mask()
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::NODE_1024
    }
}

impl TryFrom<u8> for Layout {
    type Error = crate::Error;

    fn try_from(node_bits: u8) -> Result<Self> {
        Self::new(node_bits)
    }
}

impl From<Layout> for u8 {
    fn from(layout: Layout) -> Self {
        layout.node_bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn widths_always_sum_to_64() {
        for node_bits in 0..=Layout::MAX_NODE_BITS {
            let layout = Layout::new(node_bits).unwrap();
            assert_eq!(
                layout.timestamp_bits() + layout.node_bits() + layout.counter_bits(),
                64
            );
            assert_eq!(layout.node_bits() + layout.counter_bits(), 22);
        }
    }

    #[test]
    fn rejects_node_bits_above_twenty() {
        assert_eq!(
            Layout::new(21),
            Err(Error::InvalidConfiguration(
                ConfigError::NodeBitsOutOfRange { node_bits: 21 }
            ))
        );
        assert!(Layout::try_from(u8::MAX).is_err());
    }

    #[test]
    fn predefined_layouts() {
        assert_eq!(Layout::default(), Layout::NODE_1024);
        assert_eq!(Layout::NODE_256.counter_bits(), 14);
        assert_eq!(Layout::NODE_1024.counter_bits(), 12);
        assert_eq!(Layout::NODE_4096.counter_bits(), 10);
        assert_eq!(Layout::NODE_1024.max_node(), 1023);
        assert_eq!(Layout::NODE_1024.max_counter(), 4095);
    }

    #[test]
    fn pack_and_decompose_are_inverse() {
        for node_bits in [0, 1, 8, 10, 12, 20] {
            let layout = Layout::new(node_bits).unwrap();
            let ts = Tsid::TIMESTAMP_MASK - 7;
            let node = layout.max_node() / 3;
            let counter = layout.max_counter() - 1;

            let id = layout.pack(ts, node, counter);
            assert_eq!(id.timestamp(), ts);
            assert_eq!(layout.node(id), node);
            assert_eq!(layout.counter(id), counter);
        }
    }

    #[test]
    fn pack_masks_oversized_fields() {
        let layout = Layout::NODE_1024;
        let id = layout.pack(0, 1024 + 5, 4096 + 9);
        assert_eq!(layout.node(id), 5);
        assert_eq!(layout.counter(id), 9);
        assert_eq!(id.timestamp(), 0);
    }

    #[test]
    fn zero_node_bits_gives_whole_budget_to_counter() {
        let layout = Layout::new(0).unwrap();
        assert_eq!(layout.max_node(), 0);
        assert_eq!(layout.max_counter(), Tsid::RANDOM_MASK);

        let id = layout.pack(1, 99, Tsid::RANDOM_MASK);
        assert_eq!(layout.node(id), 0);
        assert_eq!(layout.counter(id), Tsid::RANDOM_MASK);
    }
}
