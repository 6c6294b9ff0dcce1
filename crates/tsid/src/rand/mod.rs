mod interface;
#[cfg(feature = "std")]
mod thread_random;

pub use interface::*;
#[cfg(feature = "std")]
pub use thread_random::*;
