use std::sync::OnceLock;

use crate::{LockTsidFactory, RandSource, SystemClock, ThreadRandom, Tsid};

static FACTORY: OnceLock<LockTsidFactory<SystemClock, ThreadRandom>> = OnceLock::new();

/// Generates a TSID from a process-wide factory.
///
/// The factory is built on first use with the default layout and epoch and a
/// random node. Processes that share a database should build their own
/// factories with distinct nodes instead.
///
/// # Example
/// ```
/// let a = tsid::create();
/// let b = tsid::create();
/// assert!(a < b);
/// ```
pub fn create() -> Tsid {
    FACTORY
        .get_or_init(|| {
            let node = <ThreadRandom as RandSource<u32>>::rand(&ThreadRandom);
            LockTsidFactory::new(node, SystemClock, ThreadRandom)
        })
        .create()
}
