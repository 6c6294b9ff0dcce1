mod tsid;

pub use tsid::*;
