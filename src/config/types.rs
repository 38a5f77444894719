use serde::{Deserialize, Serialize};

/// Raw configuration input, as deserialized from `pgmt.yaml`. All fields
/// are optional so a partial file only overrides what it mentions.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub integration: Option<IntegrationInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IntegrationInput {
    /// Extra option/field keys to mask, beyond the built-in
    /// password/passwd/secret/token list.
    pub extra_sensitive_keys: Option<Vec<String>>,
    /// Option keys that should never be masked even if they'd otherwise
    /// match a sensitive pattern.
    pub allow_listed_keys: Option<Vec<String>>,
}

/// Resolved configuration with defaults applied.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub integration: Integration,
}

#[derive(Debug, Clone, Default)]
pub struct Integration {
    pub extra_sensitive_keys: Vec<String>,
    pub allow_listed_keys: Vec<String>,
}
