//! Pattern list mapping sensitive/environment-dependent option keys to a
//! placeholder and an operator instruction, per owner kind.

use super::IntegrationContext;

/// Recognized sensitive option keys that should never appear in the
/// generated script, independent of owner kind. `IntegrationContext` can
/// extend or exempt keys via `pgmt.yaml`.
const SENSITIVE_OPTION_KEYS: &[&str] = &["password", "passwd", "secret", "token"];

pub fn is_sensitive_option_key(ctx: &IntegrationContext, key: &str) -> bool {
    let lower = key.to_ascii_lowercase();

    if ctx.allow_listed_option_keys.iter().any(|k| k.eq_ignore_ascii_case(&lower)) {
        return false;
    }

    SENSITIVE_OPTION_KEYS.contains(&lower.as_str())
        || ctx.extra_sensitive_option_keys.iter().any(|k| k.eq_ignore_ascii_case(&lower))
}

/// Placeholder for an FDW/user-mapping option value, per spec.md §4.5's
/// `__OPTION_<KEY>__` convention.
pub fn option_placeholder(key: &str) -> String {
    let upper: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("__OPTION_{}__", upper)
}

pub fn password_placeholder() -> &'static str {
    "__PASSWORD__"
}

pub fn conninfo_placeholder() -> &'static str {
    "__CONNINFO__"
}

/// Operator-facing instruction appended as a SQL comment above a masked
/// statement.
pub fn instruction_for(field: &str, key: Option<&str>) -> String {
    match key {
        Some(key) => format!(
            "-- WARNING: {} contains sensitive/environment-dependent values ({}...)\n-- Set the real value via ALTER ... before running this script.",
            field, key
        ),
        None => format!(
            "-- WARNING: {} contains sensitive/environment-dependent values\n-- Set the real value via ALTER ... before running this script.",
            field
        ),
    }
}
