//! SQL rendering for subscription operations

use crate::catalog::id::DbObjectId;
use crate::catalog::subscription::Subscription;
use crate::diff::operations::{CommentOperation, SubscriptionOperation};
use crate::render::{RenderedSql, SqlRenderer, escape_string, quote_ident};

impl SqlRenderer for SubscriptionOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            SubscriptionOperation::Create { subscription } => vec![render_create(subscription)],
            SubscriptionOperation::Drop { name } => vec![RenderedSql::destructive(format!(
                "DROP SUBSCRIPTION {};",
                quote_ident(name)
            ))],
            SubscriptionOperation::Alter {
                name,
                enabled,
                publications,
                conninfo,
            } => {
                let mut stmts = Vec::new();
                if let Some(conninfo) = conninfo {
                    stmts.push(RenderedSql::new(format!(
                        "ALTER SUBSCRIPTION {} CONNECTION '{}';",
                        quote_ident(name),
                        escape_string(conninfo)
                    )));
                }
                if let Some(publications) = publications {
                    stmts.push(RenderedSql::new(format!(
                        "ALTER SUBSCRIPTION {} SET PUBLICATION {};",
                        quote_ident(name),
                        publications
                            .iter()
                            .map(|p| quote_ident(p))
                            .collect::<Vec<_>>()
                            .join(", ")
                    )));
                }
                if let Some(enabled) = enabled {
                    let action = if *enabled { "ENABLE" } else { "DISABLE" };
                    stmts.push(RenderedSql::new(format!(
                        "ALTER SUBSCRIPTION {} {};",
                        quote_ident(name),
                        action
                    )));
                }
                stmts
            }
            SubscriptionOperation::Comment(comment_op) => comment_op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            SubscriptionOperation::Create { subscription } => DbObjectId::Subscription {
                name: subscription.name.clone(),
            },
            SubscriptionOperation::Drop { name } | SubscriptionOperation::Alter { name, .. } => {
                DbObjectId::Subscription { name: name.clone() }
            }
            SubscriptionOperation::Comment(comment_op) => match comment_op {
                CommentOperation::Set { target, .. } | CommentOperation::Drop { target } => {
                    DbObjectId::Subscription {
                        name: target.name.clone(),
                    }
                }
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, SubscriptionOperation::Drop { .. })
    }
}

fn render_create(subscription: &Subscription) -> RenderedSql {
    RenderedSql::new(format!(
        "CREATE SUBSCRIPTION {} CONNECTION '{}' PUBLICATION {} WITH (enabled = {}, synchronous_commit = {});",
        quote_ident(&subscription.name),
        escape_string(&subscription.conninfo),
        subscription
            .publications
            .iter()
            .map(|p| quote_ident(p))
            .collect::<Vec<_>>()
            .join(", "),
        subscription.enabled,
        escape_string(&subscription.synchronous_commit)
    ))
}
