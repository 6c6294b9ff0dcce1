mod decompose;
mod layout;
mod tsid;

pub use decompose::*;
pub use layout::*;
pub use tsid::*;
