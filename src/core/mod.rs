pub mod config;
pub mod error;

pub use config::{RollType, Settings};
pub use error::{Result, RollerError};
