//! Types shared by every Vita crate.

pub mod errors;

pub use errors::{ConfigError, VitaError};

pub type Result<T> = std::result::Result<T, VitaError>;
