use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Tsid;

pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::Tsid;

    /// Serialize a TSID as its raw `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Tsid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize a TSID from its raw `u64`. Every `u64` is a valid TSID.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, D>(d: D) -> Result<Tsid, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(d).map(Tsid::from_raw)
    }
}

pub mod as_base32 {
    use super::{Deserializer, Serializer};
    use crate::Tsid;

    /// Serialize a TSID as its 13-character Crockford base32 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Tsid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(id.encode().as_str())
    }

    /// Deserialize a TSID from its 13-character Crockford base32 string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not a valid TSID (wrong length, bad character, or a
    ///   leading character above `F`)
    pub fn deserialize<'de, D>(d: D) -> Result<Tsid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base32Visitor;

        impl serde::de::Visitor<'_> for Base32Visitor {
            type Value = Tsid;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a 13-character Crockford base32 TSID")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Tsid::decode(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(Base32Visitor)
    }
}

impl Serialize for Tsid {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        as_base32::serialize(self, s)
    }
}

impl<'de> Deserialize<'de> for Tsid {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        as_base32::deserialize(d)
    }
}
