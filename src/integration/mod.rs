//! Pluggable pre-sort filter and serializer hooks.
//!
//! The filter drops changes whose sole user-visible effect is
//! environment-dependent (passwords, FDW connection strings); the
//! serializer masks sensitive literals that still need to appear (e.g. an
//! FDW option alongside a durable one) with placeholders and an operator
//! instruction comment.

pub mod filter;
pub mod masking;
pub mod serializer;

pub use filter::filter;
pub use serializer::serialize;

use crate::config::Config;

/// Shared context threaded through filter and serializer calls.
///
/// Both hooks are pure functions of `(ctx, step)`; `ctx` carries the
/// operator-configurable masking overrides loaded from `pgmt.yaml`
/// (additional sensitive keys, an allow-list that opts a key back out),
/// matching the `(diff_context, change)` contract spec.md draws.
#[derive(Debug, Default, Clone)]
pub struct IntegrationContext {
    pub extra_sensitive_option_keys: Vec<String>,
    pub allow_listed_option_keys: Vec<String>,
}

impl IntegrationContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            extra_sensitive_option_keys: config.integration.extra_sensitive_keys.clone(),
            allow_listed_option_keys: config.integration.allow_listed_keys.clone(),
        }
    }
}
