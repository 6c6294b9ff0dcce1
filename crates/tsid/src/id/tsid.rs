use core::{fmt, str::FromStr, time::Duration};

use crate::{Error, Result, TSID_EPOCH_MILLIS, base32};

/// A Time-Sortable IDentifier.
///
/// - 42 bits timestamp (ms since the factory's epoch, [`TSID_EPOCH`] by
///   default)
/// - 22 bits random component, split into node and counter by a [`Layout`]
///
/// ```text
///  Bit Index:  63             22 21                                       0
///              +----------------+-----------------------------------------+
///  Field:      | timestamp (42) |      random (22) = node | counter       |
///              +----------------+-----------------------------------------+
///              |<----------- MSB -------- 64 bits -------- LSB ---------->|
/// ```
///
/// Ordering, equality and hashing follow the raw integer, which is also the
/// order of the [`Display`](fmt::Display) string.
///
/// [`TSID_EPOCH`]: crate::TSID_EPOCH
/// [`Layout`]: crate::Layout
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tsid {
    id: u64,
}

impl Tsid {
    /// Bitmask for the 42-bit timestamp field, before shifting.
    pub const TIMESTAMP_MASK: u64 = (1 << 42) - 1;

    /// Bitmask for the 22-bit random (node and counter) field.
    pub const RANDOM_MASK: u64 = (1 << 22) - 1;

    /// Number of bits the timestamp is shifted left by.
    pub const TIMESTAMP_SHIFT: u32 = 22;

    /// The smallest TSID.
    pub const MIN: Self = Self::from_raw(0);

    /// The largest TSID.
    pub const MAX: Self = Self::from_raw(u64::MAX);

    /// Wraps a raw 64-bit value.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw 64-bit value.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Builds a TSID from a timestamp and a random component.
    ///
    /// Both are masked to their widths.
    pub const fn from_components(timestamp: u64, random: u64) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let random = random & Self::RANDOM_MASK;
        Self {
            id: timestamp | random,
        }
    }

    /// Milliseconds since the epoch the ID was generated against.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// The low 22 bits: node and counter together.
    ///
    /// Use [`Layout::node`] and [`Layout::counter`] to split it.
    ///
    /// [`Layout::node`]: crate::Layout::node
    /// [`Layout::counter`]: crate::Layout::counter
    pub const fn random(&self) -> u64 {
        self.id & Self::RANDOM_MASK
    }

    /// Unix milliseconds, assuming the default [`TSID_EPOCH`].
    ///
    /// [`TSID_EPOCH`]: crate::TSID_EPOCH
    pub const fn unix_millis(&self) -> u64 {
        self.timestamp() + TSID_EPOCH_MILLIS
    }

    /// Unix milliseconds for an ID generated against `epoch`.
    pub const fn unix_millis_with_epoch(&self, epoch: Duration) -> u64 {
        self.timestamp() + epoch.as_millis() as u64
    }

    /// The creation instant, assuming the default [`TSID_EPOCH`].
    ///
    /// [`TSID_EPOCH`]: crate::TSID_EPOCH
    #[cfg(feature = "std")]
    pub fn instant(&self) -> std::time::SystemTime {
        std::time::UNIX_EPOCH + Duration::from_millis(self.unix_millis())
    }

    /// The creation instant for an ID generated against `epoch`.
    #[cfg(feature = "std")]
    pub fn instant_with_epoch(&self, epoch: Duration) -> std::time::SystemTime {
        std::time::UNIX_EPOCH + Duration::from_millis(self.unix_millis_with_epoch(epoch))
    }

    /// Big-endian byte representation.
    pub const fn to_bytes(&self) -> [u8; 8] {
        self.id.to_be_bytes()
    }

    /// Reads a TSID from its big-endian byte representation.
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self::from_raw(u64::from_be_bytes(bytes))
    }

    /// Returns a stack-allocated formatter holding the 13-character
    /// Crockford base32 form.
    ///
    /// # Example
    /// ```
    /// use tsid::Tsid;
    ///
    /// let id = Tsid::from_raw(2_424_242_424_242_424_242);
    /// assert_eq!(id.encode(), "23953MG16DJDJ");
    /// ```
    pub fn encode(&self) -> base32::TsidFormatter {
        base32::TsidFormatter::new(*self)
    }

    /// Encodes into a caller-provided buffer and returns it as `&str`.
    pub fn encode_to_buf<'buf>(&self, buf: &'buf mut [u8; base32::ENCODED_LEN]) -> &'buf str {
        base32::encode_base32(self.id, buf);
        // SAFETY: `encode_base32` writes only Crockford alphabet bytes, which
        // are ASCII.
        unsafe { core::str::from_utf8_unchecked(buf) }
    }

    /// Parses the 13-character string form.
    ///
    /// Lowercase letters and the look-alikes `O`, `I` and `L` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if `s` is not 13 bytes long, contains
    /// a byte outside the accepted set, or starts with a character above `F`.
    ///
    /// # Example
    /// ```
    /// use tsid::Tsid;
    ///
    /// let id = Tsid::decode("0AWE5HZP3SKTK").unwrap();
    /// assert_eq!(Tsid::decode("0awe5hzp3sktk").unwrap(), id);
    /// assert!(Tsid::decode("0AWE5HZP3SKT").is_err());
    /// ```
    pub fn decode(s: impl AsRef<str>) -> Result<Self> {
        base32::decode_base32(s.as_ref()).map(Self::from_raw)
    }

    /// Returns `true` if [`Self::decode`] would succeed.
    pub fn is_valid(s: impl AsRef<str>) -> bool {
        base32::is_valid(s.as_ref())
    }
}

impl fmt::Display for Tsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.encode(), f)
    }
}

impl fmt::Debug for Tsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tsid")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("random", &self.random())
            .finish()
    }
}

impl FromStr for Tsid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl TryFrom<&str> for Tsid {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl From<u64> for Tsid {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Tsid> for u64 {
    fn from(id: Tsid) -> Self {
        id.to_raw()
    }
}
