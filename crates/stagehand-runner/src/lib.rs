pub mod config;
pub mod doctor;
pub mod env;
pub mod session;

pub use config::*;
pub use doctor::*;
pub use env::*;
pub use session::*;
