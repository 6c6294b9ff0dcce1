mod atomic;
mod basic;
mod config;
#[cfg(feature = "std")]
mod global;
mod interface;
#[cfg(feature = "std")]
mod lock;
#[cfg(feature = "std")]
mod mutex;
mod state;

pub use atomic::*;
pub use basic::*;
pub use config::{CounterInit, TsidConfig};
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
pub use global::*;
pub use interface::*;
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
pub use lock::*;
