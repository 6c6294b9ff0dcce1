//! Free-standing accessors for raw `u64` TSIDs.

#[cfg(feature = "std")]
use core::time::Duration;

use crate::{Layout, Tsid};

/// The creation instant of a raw TSID generated against the default
/// [`TSID_EPOCH`](crate::TSID_EPOCH).
///
/// IDs from a factory with a custom epoch decode with
/// [`decompose_timestamp_with_epoch`] instead.
///
/// # Example
/// ```
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let id = tsid::Tsid::from_components(5, 0).to_raw();
/// assert_eq!(
///     tsid::decompose_timestamp(id),
///     UNIX_EPOCH + tsid::TSID_EPOCH + Duration::from_millis(5)
/// );
/// ```
#[cfg(feature = "std")]
pub fn decompose_timestamp(id: u64) -> std::time::SystemTime {
    Tsid::from_raw(id).instant()
}

/// The creation instant of a raw TSID generated against `epoch`.
///
/// # Example
/// ```
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let epoch = Duration::from_millis(1_000);
/// let id = tsid::Tsid::from_components(5, 0).to_raw();
/// assert_eq!(
///     tsid::decompose_timestamp_with_epoch(id, epoch),
///     UNIX_EPOCH + Duration::from_millis(1_005)
/// );
/// ```
#[cfg(feature = "std")]
pub fn decompose_timestamp_with_epoch(id: u64, epoch: Duration) -> std::time::SystemTime {
    Tsid::from_raw(id).instant_with_epoch(epoch)
}

/// The node field of a raw TSID under `layout`.
pub const fn decompose_node(id: u64, layout: Layout) -> u64 {
    layout.node(Tsid::from_raw(id))
}

/// The counter field of a raw TSID under `layout`.
pub const fn decompose_counter(id: u64, layout: Layout) -> u64 {
    layout.counter(Tsid::from_raw(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_the_low_bits_by_layout() {
        let layout = Layout::NODE_256;
        let id = layout.pack(1234, 0xAB, 0x2FFF).to_raw();
        assert_eq!(decompose_node(id, layout), 0xAB);
        assert_eq!(decompose_counter(id, layout), 0x2FFF);

        // Reading under a different layout moves the split point.
        let wide = Layout::new(12).unwrap();
        assert_eq!(decompose_node(id, wide), (0xAB << 4) | 0xB);
        assert_eq!(decompose_counter(id, wide), 0x3FF);
    }

    #[cfg(feature = "std")]
    #[test]
    fn timestamp_is_offset_by_default_epoch() {
        let id = Tsid::from_components(86_400_000, 0).to_raw();
        let millis = crate::TSID_EPOCH_MILLIS + 86_400_000;
        let expected = std::time::UNIX_EPOCH + Duration::from_millis(millis);
        assert_eq!(decompose_timestamp(id), expected);
    }

    #[cfg(feature = "std")]
    #[test]
    fn timestamp_honours_custom_epoch() {
        let epoch = Duration::from_millis(1_000);
        let id = Tsid::from_components(1_577_836_799_005, 0).to_raw();
        let expected = std::time::UNIX_EPOCH + Duration::from_millis(1_577_836_800_005);
        assert_eq!(decompose_timestamp_with_epoch(id, epoch), expected);
        assert_ne!(decompose_timestamp(id), expected);
    }
}
