//! `filter(ctx, step) -> bool`: true keeps the step, false drops it.
//!
//! A step is dropped only when its sole user-visible effect is
//! environment-dependent. Per-kind differs already separate durable and
//! env-dependent fields into distinct Alter steps where possible (e.g.
//! subscription `enabled`/`publications` vs. `conninfo`), so the filter
//! mostly has to recognize "this Alter step touches nothing but the
//! env-dependent field(s)".

use super::IntegrationContext;
use super::masking::is_sensitive_option_key;
use crate::diff::operations::{ForeignServerOperation, MigrationStep, SubscriptionOperation, UserMappingOperation};

pub fn filter(ctx: &IntegrationContext, step: &MigrationStep) -> bool {
    match step {
        // Pure conninfo-only deltas are dropped per spec.md's Open Question
        // resolution (see DESIGN.md); a conninfo change alongside any other
        // field is kept and masked by the serializer instead.
        MigrationStep::Subscription(SubscriptionOperation::Alter {
            enabled,
            publications,
            conninfo,
            ..
        }) => !(conninfo.is_some() && enabled.is_none() && publications.is_none()),

        // A server/user-mapping AlterOptions step whose only changed
        // options are sensitive keys carries no durable effect once those
        // keys are masked, so it's dropped outright rather than emitted as
        // an all-placeholder no-op statement.
        MigrationStep::ForeignServer(ForeignServerOperation::AlterOptions { options, .. }) => {
            !options.keys().all(|k| is_sensitive_option_key(ctx, k))
        }
        MigrationStep::UserMapping(UserMappingOperation::AlterOptions { options, .. }) => {
            !options.keys().all(|k| is_sensitive_option_key(ctx, k))
        }

        _ => true,
    }
}
