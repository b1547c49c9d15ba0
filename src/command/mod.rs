//! Roll command pipeline
//!
//! Raw query -> tokens -> Request -> one uniform draw -> Roll

pub mod resolver;
pub mod token;
pub mod usage;

pub use resolver::{resolve, Roll, RollResolver};
pub use token::{tokenize, Token};
pub use usage::{usage_text, RollError, USAGE_TITLE};
