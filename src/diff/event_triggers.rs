use crate::catalog::event_trigger::EventTrigger;
use crate::diff::comment_utils;
use crate::diff::operations::{
    CommentOperation, EventTriggerOperation, EventTriggerTarget, MigrationStep,
};

pub fn diff(old: Option<&EventTrigger>, new: Option<&EventTrigger>) -> Vec<MigrationStep> {
    match (old, new) {
        (None, Some(n)) => {
            let mut out = vec![MigrationStep::EventTrigger(EventTriggerOperation::Create {
                trigger: n.clone(),
            })];
            if let Some(comment) = &n.comment {
                out.push(MigrationStep::EventTrigger(EventTriggerOperation::Comment(
                    CommentOperation::Set {
                        target: EventTriggerTarget { name: n.name.clone() },
                        comment: comment.clone(),
                    },
                )));
            }
            out
        }
        (Some(o), None) => vec![MigrationStep::EventTrigger(EventTriggerOperation::Drop {
            name: o.name.clone(),
        })],
        (Some(o), Some(n)) => {
            let mut steps = Vec::new();
            if o.event != n.event || o.function != n.function || o.tags != n.tags {
                steps.push(MigrationStep::EventTrigger(EventTriggerOperation::Drop {
                    name: o.name.clone(),
                }));
                steps.push(MigrationStep::EventTrigger(EventTriggerOperation::Create {
                    trigger: n.clone(),
                }));
                return steps;
            }

            if o.enabled != n.enabled {
                steps.push(MigrationStep::EventTrigger(EventTriggerOperation::SetEnabled {
                    name: n.name.clone(),
                    enabled: n.enabled.clone(),
                }));
            }

            let comment_ops =
                comment_utils::handle_comment_diff(Some(o), Some(n), || EventTriggerTarget {
                    name: n.name.clone(),
                });
            for op in comment_ops {
                steps.push(MigrationStep::EventTrigger(EventTriggerOperation::Comment(op)));
            }
            steps
        }
        (None, None) => vec![],
    }
}
