//! Time-Sorted Unique Identifiers.
//!
//! A TSID is a 64-bit integer: 42 bits of milliseconds since a custom epoch,
//! then a node field and a per-millisecond counter sharing the remaining 22
//! bits. Its string form is 13 characters of Crockford base32 that sort the
//! same way the integers do.
//!
//! ```
//! use tsid::{LockTsidFactory, SystemClock, ThreadRandom, Tsid};
//!
//! let factory = LockTsidFactory::new(42, SystemClock, ThreadRandom);
//! let id = factory.create();
//!
//! let s = id.to_string();
//! assert_eq!(s.len(), 13);
//! assert_eq!(Tsid::decode(&s).unwrap(), id);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod base32;
mod error;
mod generator;
mod id;
mod rand;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::base32::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::time::*;
