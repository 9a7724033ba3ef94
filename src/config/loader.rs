//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the decoder
//! configuration from a YAML file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DecodeError, DecodeResult};

use super::types::DecoderConfig;

/// Loads and provides access to the decoder configuration.
///
/// # File format
///
/// ```text
/// header_strictness: lenient   # strict | lenient
/// final_period: thirty_one     # thirty | thirty_one | calendar
/// error_policy: skip           # skip | abort
/// record_tags: [A1, A2, A3, A4]
/// datasets:
///   slim: ./data/mock/data_small.csv
///   full: ./data/mock/data.csv
/// ```
///
/// # Example
///
/// ```no_run
/// use tps_decoder::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/decoder.yaml")?;
/// println!("A4 labels: {:?}", loader.config().final_period);
/// # Ok::<(), tps_decoder::error::DecodeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    config: DecoderConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML or unknown enum values
    pub fn load<P: AsRef<Path>>(path: P) -> DecodeResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| DecodeError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config =
            DecoderConfig::from_yaml_str(&content).map_err(|e| DecodeError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// Returns the path the configuration was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> DecoderConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ErrorPolicy, FinalPeriod, HeaderStrictness};
    use crate::models::RecordTag;

    fn config_path() -> &'static str {
        "./config/decoder.yaml"
    }

    #[test]
    fn test_load_repository_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        let config = loader.config();
        assert_eq!(config.header_strictness, HeaderStrictness::Lenient);
        assert_eq!(config.final_period, FinalPeriod::ThirtyOne);
        assert_eq!(config.error_policy, ErrorPolicy::Skip);
        assert_eq!(config.record_tags, RecordTag::ALL.to_vec());
        assert_eq!(config.encoding, "windows-31j");
        assert_eq!(loader.path(), Path::new(config_path()));
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/decoder.yaml");

        match result {
            Err(DecodeError::ConfigNotFound { path }) => {
                assert!(path.contains("decoder.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "tps-decoder-bad-{}.yaml",
            std::process::id()
        ));
        fs::write(&path, "final_period: fortnightly\n").unwrap();

        let result = ConfigLoader::load(&path);
        fs::remove_file(&path).ok();

        match result {
            Err(DecodeError::ConfigParseError { message, .. }) => {
                assert!(message.contains("fortnightly"), "{message}");
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
