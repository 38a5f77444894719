//! `serialize(ctx, step) -> Option<String>`: `None` falls back to the
//! step's own `SqlRenderer::to_sql()`. A `Some` wraps the rendered SQL
//! with a masking comment when the step carries a field that needs
//! masking but survived the filter because it isn't the step's sole
//! effect.

use super::IntegrationContext;
use super::masking::{conninfo_placeholder, instruction_for, is_sensitive_option_key, option_placeholder};
use crate::diff::operations::{ForeignServerOperation, MigrationStep, SubscriptionOperation, UserMappingOperation};
use crate::render::{RenderedSql, SqlRenderer};

pub fn serialize(ctx: &IntegrationContext, step: &MigrationStep) -> Option<Vec<RenderedSql>> {
    match step {
        MigrationStep::Subscription(SubscriptionOperation::Alter {
            name,
            enabled,
            publications,
            conninfo: Some(_),
        }) => {
            let masked = SubscriptionOperation::Alter {
                name: name.clone(),
                enabled: *enabled,
                publications: publications.clone(),
                conninfo: Some(conninfo_placeholder().to_string()),
            };
            let rendered = masked.to_sql();
            Some(prefix_warning(rendered, "subscription.conninfo", None))
        }

        MigrationStep::ForeignServer(ForeignServerOperation::AlterOptions { name, options }) => {
            if options.keys().any(|k| is_sensitive_option_key(ctx, k)) {
                let masked_options = options
                    .iter()
                    .map(|(k, v)| {
                        if is_sensitive_option_key(ctx, k) {
                            (k.clone(), option_placeholder(k))
                        } else {
                            (k.clone(), v.clone())
                        }
                    })
                    .collect();
                let masked = ForeignServerOperation::AlterOptions {
                    name: name.clone(),
                    options: masked_options,
                };
                let rendered = masked.to_sql();
                let sensitive_key = options.keys().find(|k| is_sensitive_option_key(ctx, k)).cloned();
                Some(prefix_warning(rendered, "server.options", sensitive_key.as_deref()))
            } else {
                None
            }
        }

        MigrationStep::UserMapping(UserMappingOperation::AlterOptions {
            server,
            user,
            options,
        }) => {
            if options.keys().any(|k| is_sensitive_option_key(ctx, k)) {
                let masked_options = options
                    .iter()
                    .map(|(k, v)| {
                        if is_sensitive_option_key(ctx, k) {
                            (k.clone(), option_placeholder(k))
                        } else {
                            (k.clone(), v.clone())
                        }
                    })
                    .collect();
                let masked = UserMappingOperation::AlterOptions {
                    server: server.clone(),
                    user: user.clone(),
                    options: masked_options,
                };
                let rendered = masked.to_sql();
                let sensitive_key = options.keys().find(|k| is_sensitive_option_key(ctx, k)).cloned();
                Some(prefix_warning(rendered, "user_mapping.options", sensitive_key.as_deref()))
            } else {
                None
            }
        }

        _ => None,
    }
}

fn prefix_warning(rendered: Vec<RenderedSql>, field: &str, key: Option<&str>) -> Vec<RenderedSql> {
    let comment = instruction_for(field, key);
    rendered
        .into_iter()
        .map(|r| RenderedSql {
            sql: format!("{}\n{}", comment, r.sql),
            safety: r.safety,
        })
        .collect()
}
