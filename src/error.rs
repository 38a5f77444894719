//! Error taxonomy for conditions callers legitimately want to match on.
//!
//! Most of the codebase returns `anyhow::Result` and attaches context via
//! `.context(...)` as it propagates — that's sufficient for the bulk of
//! extraction/diff failures, which are always fatal and only need a good
//! message. `PgmtError` exists for the handful of cases where the caller
//! (currently just `main.rs`, deciding exit codes and log formatting)
//! needs to distinguish the failure kind rather than match on a string.

#[derive(thiserror::Error, Debug)]
pub enum PgmtError {
    #[error("extraction failed: {0}")]
    Extraction(#[source] anyhow::Error),

    #[error("invalid {kind} row: {detail}")]
    ModelValidation { kind: &'static str, detail: String },

    #[error("diff invariant violated for {stable_id}: {detail}")]
    DiffInvariant { stable_id: String, detail: String },

    #[error("dependency cycle: {0}")]
    DependencyCycle(String),

    #[error("serialization failed for {stable_id}: {detail}")]
    Serialization { stable_id: String, detail: String },
}
