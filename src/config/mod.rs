pub mod builder;
pub mod types;

pub use builder::ConfigBuilder;
pub use types::*;

use anyhow::Result;
use std::path::Path;

/// Loads a `pgmt.yaml`-shaped config file, returning defaults if it
/// doesn't exist.
pub fn load_config(config_file: &str) -> Result<ConfigInput> {
    if Path::new(config_file).exists() {
        let contents = std::fs::read_to_string(config_file)?;
        Ok(serde_yaml::from_str(&contents)?)
    } else {
        Ok(ConfigInput::default())
    }
}
