//! Input collection and presentation around the `pricing` engine: six numbers
//! come in from flags, a TOML file or stdin, ten labelled figures go out.

pub mod config;
pub mod error;
pub mod report;
pub mod stream;

pub use error::{CliError, Result};
