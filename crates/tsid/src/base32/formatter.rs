use core::fmt;

use super::{ENCODED_LEN, encode_base32};
use crate::Tsid;

/// An owned, stack-allocated Crockford base32 rendering of a [`Tsid`].
///
/// Returned by [`Tsid::encode`]. It is a zero-allocation view that implements
/// [`Display`](fmt::Display) and [`AsRef<str>`], and compares directly against
/// string slices.
///
/// # Example
/// ```
/// use tsid::Tsid;
/// use std::fmt::Write;
///
/// let formatted = Tsid::from_raw(42).encode();
/// assert_eq!(formatted, "000000000001A");
///
/// let mut s = String::new();
/// write!(s, "{formatted}").unwrap();
/// assert_eq!(s, "000000000001A");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TsidFormatter {
    buf: [u8; ENCODED_LEN],
}

impl TsidFormatter {
    /// Encodes `id` into a new formatter.
    pub fn new(id: Tsid) -> Self {
        let mut buf = [0; ENCODED_LEN];
        encode_base32(id.to_raw(), &mut buf);
        Self { buf }
    }

    /// Returns a `&str` view of the encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `self.buf` holds only Crockford base32 ASCII characters
        unsafe { core::str::from_utf8_unchecked(&self.buf) }
    }

    /// Consumes the formatter and returns the raw buffer.
    pub const fn into_inner(self) -> [u8; ENCODED_LEN] {
        self.buf
    }
}

impl fmt::Display for TsidFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for TsidFormatter {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for TsidFormatter {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TsidFormatter {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<alloc::string::String> for TsidFormatter {
    fn eq(&self, other: &alloc::string::String) -> bool {
        self.as_str() == other.as_str()
    }
}
