//! Error types for decoding and factory construction.
//!
//! Generation itself is infallible: clock regression and counter overflow are
//! absorbed by the factory. The only failures are a malformed string handed to
//! the decoder and an invalid configuration handed to a factory constructor.

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `tsid` can produce.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A string could not be decoded into a TSID.
    #[error("invalid TSID format: {0}")]
    InvalidFormat(#[from] FormatError),

    /// A factory was constructed with an unusable configuration.
    #[error("invalid factory configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Reasons a string is not a canonical TSID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The input is not exactly 13 bytes long.
    #[error("expected 13 characters, got {len}")]
    InvalidLength {
        /// Length of the rejected input in bytes.
        len: usize,
    },

    /// The input contains a byte outside the Crockford alphabet and its
    /// accepted aliases.
    #[error("invalid character {:?} at index {index}", as_char(.byte))]
    InvalidCharacter {
        /// The offending byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },

    /// The leading character carries a 65th bit.
    ///
    /// Thirteen base32 characters hold 65 bits, so the first character must
    /// decode to a value below 16 (`0` through `F`).
    #[error("leading character {:?} overflows 64 bits", as_char(.byte))]
    Overflow {
        /// The leading byte.
        byte: u8,
    },
}

/// Reasons a factory configuration is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `node_bits` is above [`Layout::MAX_NODE_BITS`].
    ///
    /// [`Layout::MAX_NODE_BITS`]: crate::Layout::MAX_NODE_BITS
    #[error("node bits must be in 0..=20, got {node_bits}")]
    NodeBitsOutOfRange {
        /// The rejected width.
        node_bits: u8,
    },

    /// The custom epoch lies after the clock's current reading, so every
    /// timestamp would be negative.
    #[error("custom epoch {epoch_millis} is later than the current time {now_millis}")]
    EpochInFuture {
        /// The configured epoch, in Unix milliseconds.
        epoch_millis: u64,
        /// The clock reading at construction, in Unix milliseconds.
        now_millis: u64,
    },

    /// More than 2^42 ms have passed since the custom epoch, so the current
    /// time no longer fits in the 42-bit timestamp field.
    #[error("custom epoch {epoch_millis} is over 2^42 ms before {now_millis}")]
    EpochTooOld {
        /// The configured epoch, in Unix milliseconds.
        epoch_millis: u64,
        /// The clock reading at construction, in Unix milliseconds.
        now_millis: u64,
    },
}

fn as_char(byte: &u8) -> char {
    char::from(*byte)
}
