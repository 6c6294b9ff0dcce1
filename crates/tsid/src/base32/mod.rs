mod crockford;
mod formatter;

pub use crockford::*;
pub use formatter::*;
