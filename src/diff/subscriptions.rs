use crate::catalog::subscription::Subscription;
use crate::diff::comment_utils;
use crate::diff::operations::{
    CommentOperation, MigrationStep, SubscriptionOperation, SubscriptionTarget,
};

pub fn diff(old: Option<&Subscription>, new: Option<&Subscription>) -> Vec<MigrationStep> {
    match (old, new) {
        (None, Some(n)) => {
            let mut out = vec![MigrationStep::Subscription(SubscriptionOperation::Create {
                subscription: n.clone(),
            })];
            if let Some(comment) = &n.comment {
                out.push(MigrationStep::Subscription(SubscriptionOperation::Comment(
                    CommentOperation::Set {
                        target: SubscriptionTarget { name: n.name.clone() },
                        comment: comment.clone(),
                    },
                )));
            }
            out
        }
        (Some(o), None) => vec![MigrationStep::Subscription(SubscriptionOperation::Drop {
            name: o.name.clone(),
        })],
        (Some(o), Some(n)) => {
            let mut steps = Vec::new();

            let enabled = (o.enabled != n.enabled).then_some(n.enabled);
            let publications = (o.publications != n.publications).then(|| n.publications.clone());
            let conninfo = (o.conninfo != n.conninfo).then(|| n.conninfo.clone());

            if enabled.is_some() || publications.is_some() || conninfo.is_some() {
                steps.push(MigrationStep::Subscription(SubscriptionOperation::Alter {
                    name: n.name.clone(),
                    enabled,
                    publications,
                    conninfo,
                }));
            }

            let comment_ops =
                comment_utils::handle_comment_diff(Some(o), Some(n), || SubscriptionTarget {
                    name: n.name.clone(),
                });
            for op in comment_ops {
                steps.push(MigrationStep::Subscription(SubscriptionOperation::Comment(op)));
            }

            steps
        }
        (None, None) => vec![],
    }
}
