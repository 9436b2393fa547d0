//! Parsing and validation of `hdlconv.toml` converter configuration files.
//!
//! This crate reads the optional configuration file and produces a
//! strongly-typed [`ConvertConfig`] controlling language selection and output
//! formatting.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, load_config_or_default, CONFIG_FILE};
pub use types::*;
