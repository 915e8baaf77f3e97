pub mod format;
pub mod record;

pub use format::*;
pub use record::*;
