use crate::conf::error::ConfigError;
use crate::conf::types::ConfigFile;
use std::fs;
use std::path::Path;

/// Reads a TOML configuration file.
///
/// Only IO and syntax are checked here. Values are validated when the file is
/// resolved into [`MonitorSettings`](crate::conf::MonitorSettings).
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    toml::from_str(&raw).map_err(|e| ConfigError::parse(path, e))
}
