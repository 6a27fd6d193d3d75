//! Parsing and validation of `strata.toml` optimizer configuration files.
//!
//! This crate reads the optional configuration file and produces a strongly-typed
//! [`StrataConfig`] holding every tunable constant of the placement optimizer:
//! annealing schedule, cost weights, enabled move kinds, block sizing, run
//! settings, and request limits. Every field has a documented default, so an empty file (or no file
//! at all) yields [`StrataConfig::default`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    load_config, load_config_file, load_config_from_str, validate_config, CONFIG_FILE_NAME,
};
pub use types::*;
