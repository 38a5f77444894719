use crate::config::types::{Config, ConfigInput, Integration};

/// Merges a file-sourced `ConfigInput` into a resolved `Config`, applying
/// defaults for anything the file leaves unset.
pub struct ConfigBuilder {
    input: ConfigInput,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            input: ConfigInput::default(),
        }
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        if file_input.integration.is_some() {
            self.input.integration = file_input.integration;
        }
        self
    }

    pub fn build(self) -> Config {
        let integration = self.input.integration.unwrap_or_default();

        Config {
            integration: Integration {
                extra_sensitive_keys: integration.extra_sensitive_keys.unwrap_or_default(),
                allow_listed_keys: integration.allow_listed_keys.unwrap_or_default(),
            },
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
