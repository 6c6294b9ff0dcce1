use alloc::string::String;

use crate::{FormatError, Result};

/// Length of the string form of a TSID: `ceil(64 / 5)`.
pub const ENCODED_LEN: usize = 13;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: u32 = 5;
const CHAR_MASK: u64 = 0x1F;

/// The leading character only has room for the top 4 bits of a `u64`.
const LEADING_OVERFLOW: u8 = 0b1_0000;

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Writes the 13-character Crockford base32 form of `id` into `buf`, most
/// significant group first.
#[inline]
pub fn encode_base32(id: u64, buf: &mut [u8; ENCODED_LEN]) {
    for (i, out) in buf.iter_mut().enumerate() {
        let shift = BITS_PER_CHAR * (ENCODED_LEN - 1 - i) as u32;
        *out = ALPHABET[((id >> shift) & CHAR_MASK) as usize];
    }
}

/// Decodes a 13-character Crockford base32 string.
///
/// # Errors
///
/// - [`FormatError::InvalidLength`] if `encoded` is not 13 bytes long
/// - [`FormatError::InvalidCharacter`] for a byte outside the alphabet and
///   its lowercase and look-alike aliases
/// - [`FormatError::Overflow`] if the leading character is above `F`
#[inline]
pub fn decode_base32(encoded: &str) -> Result<u64> {
    let bytes = encoded.as_bytes();
    if bytes.len() != ENCODED_LEN {
        return Err(FormatError::InvalidLength { len: bytes.len() }.into());
    }

    let mut acc = 0_u64;
    for (index, &byte) in bytes.iter().enumerate() {
        let val = LOOKUP[byte as usize];
        if val == NO_VALUE {
            return Err(FormatError::InvalidCharacter { byte, index }.into());
        }
        if index == 0 && val & LEADING_OVERFLOW != 0 {
            return Err(FormatError::Overflow { byte }.into());
        }
        acc = (acc << BITS_PER_CHAR) | u64::from(val);
    }

    Ok(acc)
}

/// Encodes a raw TSID into its 13-character string form.
///
/// # Example
/// ```
/// assert_eq!(tsid::encode(0), "0000000000000");
/// assert_eq!(tsid::encode(u64::MAX), "FZZZZZZZZZZZZ");
/// ```
pub fn encode(id: u64) -> String {
    let mut buf = [0; ENCODED_LEN];
    encode_base32(id, &mut buf);
    buf.iter().map(|&b| char::from(b)).collect()
}

/// Decodes a 13-character string into a raw TSID.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`](crate::Error::InvalidFormat); see
/// [`decode_base32`].
pub fn decode(s: &str) -> Result<u64> {
    decode_base32(s)
}

/// Returns `true` if `s` decodes to a TSID.
pub fn is_valid(s: &str) -> bool {
    decode_base32(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use alloc::vec::Vec;

    #[test]
    fn known_values() {
        assert_eq!(encode(0), "0000000000000");
        assert_eq!(encode(1), "0000000000001");
        assert_eq!(encode(31), "000000000000Z");
        assert_eq!(encode(32), "0000000000010");
        assert_eq!(encode(u64::MAX), "FZZZZZZZZZZZZ");
        assert_eq!(encode(2_424_242_424_242_424_242), "23953MG16DJDJ");
        assert_eq!(decode("FZZZZZZZZZZZZ").unwrap(), u64::MAX);
        assert_eq!(decode("23953MG16DJDJ").unwrap(), 2_424_242_424_242_424_242);
    }

    #[test]
    fn encode_decode_preserves_u64_values() {
        for &v in &[
            0,
            1,
            u64::MAX,
            u64::MAX - 1,
            42,
            1 << 63,
            (1 << 60) - 1,
            0xFF00_FF00_FF00_FF00,
            0x1234_5678_90AB_CDEF,
        ] {
            let s = encode(v);
            assert_eq!(s.len(), ENCODED_LEN, "fixed width for {v}");
            assert_eq!(decode(&s).unwrap(), v, "roundtrip for {v}, b32={s}");
        }
    }

    #[test]
    fn lexicographic_order_matches_numeric_order() {
        let mut values: Vec<u64> = (0..64).map(|shift| 1_u64 << shift).collect();
        values.extend((0..64).map(|shift| u64::MAX >> shift));
        values.extend([0, 31, 32, 1023, 1024, 0x0123_4567_89AB_CDEF]);
        values.sort_unstable();
        values.dedup();

        for pair in values.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            let (a, b) = (encode(lo), encode(hi));
            assert!(a < b, "{lo} ({a}) should sort before {hi} ({b})");
        }
    }

    #[test]
    fn decode_accepts_lowercase_characters() {
        assert_eq!(
            decode("0abcdefghjkmn").unwrap(),
            decode("0ABCDEFGHJKMN").unwrap()
        );
        assert_eq!(
            decode("0pqrstvwxyzZz").unwrap(),
            decode("0PQRSTVWXYZZZ").unwrap()
        );
    }

    #[test]
    fn decode_treats_crockford_aliases_as_canonical_values() {
        let aliases = [
            (b'O', b'0'),
            (b'o', b'0'),
            (b'I', b'1'),
            (b'i', b'1'),
            (b'L', b'1'),
            (b'l', b'1'),
        ];

        for (alias, canonical) in aliases {
            let mut alias_buf = [alias; ENCODED_LEN];
            let mut canonical_buf = [canonical; ENCODED_LEN];
            alias_buf[0] = b'0';
            canonical_buf[0] = b'0';

            let alias_str = core::str::from_utf8(&alias_buf).unwrap();
            let canonical_str = core::str::from_utf8(&canonical_buf).unwrap();

            assert_eq!(
                decode(alias_str).unwrap(),
                decode(canonical_str).unwrap(),
                "alias {} should decode to same value as {}",
                alias as char,
                canonical as char
            );
        }
    }

    #[test]
    fn decode_returns_error_for_invalid_length() {
        for s in ["", "0", "000000000000", "00000000000000"] {
            assert_eq!(
                decode(s),
                Err(Error::InvalidFormat(FormatError::InvalidLength {
                    len: s.len()
                }))
            );
            assert!(!is_valid(s));
        }
    }

    #[test]
    fn decode_returns_error_for_invalid_character() {
        assert_eq!(
            decode("012345678901@"),
            Err(Error::InvalidFormat(FormatError::InvalidCharacter {
                byte: b'@',
                index: 12,
            }))
        );
        assert_eq!(
            decode("0U00000000000"),
            Err(Error::InvalidFormat(FormatError::InvalidCharacter {
                byte: b'U',
                index: 1,
            }))
        );
        assert!(!is_valid("0000 00000000"));
        assert!(!is_valid("000000000000-"));
    }

    #[test]
    fn decode_rejects_multibyte_input_by_byte_length() {
        // 12 chars in 13 bytes.
        let s = "00000000000é";
        assert_eq!(s.chars().count(), 12);
        assert!(!is_valid(s));
        // 13 chars in 14 bytes.
        let s = "000000000000é";
        assert_eq!(s.chars().count(), 13);
        assert_eq!(
            decode(s),
            Err(Error::InvalidFormat(FormatError::InvalidLength { len: 14 }))
        );
    }

    #[test]
    fn decode_rejects_leading_overflow() {
        assert!(is_valid("FZZZZZZZZZZZZ"));
        for lead in ["G", "g", "Z", "z", "V"] {
            let s = alloc::format!("{lead}000000000000");
            assert_eq!(
                decode(&s),
                Err(Error::InvalidFormat(FormatError::Overflow {
                    byte: lead.as_bytes()[0]
                }))
            );
            assert!(!is_valid(&s));
        }
    }
}
