//! Configuration loading and management for the TPS decoder.
//!
//! This module provides the decoder options (header strictness, `A4` period
//! label policy, error policy, tag selection) and their YAML loader.
//!
//! # Example
//!
//! ```no_run
//! use tps_decoder::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/decoder.yaml").unwrap().into_config();
//! println!("Strictness: {:?}", config.header_strictness);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_ENCODING, DatasetPaths, DecoderConfig, ErrorPolicy, FinalPeriod, HeaderStrictness,
};
