pub mod commands;
pub mod model;
pub mod status;
pub mod types;

pub use commands::*;
pub use model::*;
pub use status::*;
pub use types::*;
