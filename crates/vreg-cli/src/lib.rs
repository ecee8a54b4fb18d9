#![forbid(unsafe_code)]

pub mod cli;
pub mod compose;
pub mod error;
pub mod inspect;
pub mod logging;
pub mod playground;
pub mod scan;
pub mod source;

pub use cli::run_from_env;
pub use error::{Result, VregError};
