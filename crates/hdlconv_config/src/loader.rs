//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ConvertConfig;
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "hdlconv.toml";

/// Widest indentation accepted for pretty output.
const MAX_INDENT: usize = 8;

/// Loads and validates an `hdlconv.toml` configuration from a directory.
///
/// Reads `<dir>/hdlconv.toml`, parses it, and validates its values.
pub fn load_config(dir: &Path) -> Result<ConvertConfig, ConfigError> {
    let content = std::fs::read_to_string(dir.join(CONFIG_FILE))?;
    load_config_from_str(&content)
}

/// Like [`load_config`], but returns the defaults when the file does not exist.
pub fn load_config_or_default(dir: &Path) -> Result<ConvertConfig, ConfigError> {
    if !dir.join(CONFIG_FILE).is_file() {
        return Ok(ConvertConfig::default());
    }
    load_config(dir)
}

/// Parses and validates an `hdlconv.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ConvertConfig, ConfigError> {
    let config: ConvertConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ConvertConfig) -> Result<(), ConfigError> {
    let indent = config.output.indent;
    if config.output.pretty && !(1..=MAX_INDENT).contains(&indent) {
        return Err(ConfigError::ValidationError(format!(
            "output.indent must be between 1 and {MAX_INDENT}, got {indent}"
        )));
    }
    Ok(())
}
