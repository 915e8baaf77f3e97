pub mod archive;
pub mod error;
pub mod publisher;
pub mod staging;

pub use archive::*;
pub use error::*;
pub use publisher::*;
pub use staging::*;
