//! SQL rendering for event trigger operations

use crate::catalog::event_trigger::EventTrigger;
use crate::catalog::id::DbObjectId;
use crate::diff::operations::{CommentOperation, EventTriggerOperation};
use crate::render::{RenderedSql, SqlRenderer, escape_string, quote_ident};

impl SqlRenderer for EventTriggerOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            EventTriggerOperation::Create { trigger } => vec![render_create(trigger)],
            EventTriggerOperation::Drop { name } => vec![RenderedSql::destructive(format!(
                "DROP EVENT TRIGGER {};",
                quote_ident(name)
            ))],
            EventTriggerOperation::SetEnabled { name, enabled } => {
                let clause = match enabled.as_str() {
                    "O" => "ENABLE",
                    "D" => "DISABLE",
                    "R" => "ENABLE REPLICA",
                    "A" => "ENABLE ALWAYS",
                    _ => "ENABLE",
                };
                vec![RenderedSql::new(format!(
                    "ALTER EVENT TRIGGER {} {};",
                    quote_ident(name),
                    clause
                ))]
            }
            EventTriggerOperation::Comment(comment_op) => comment_op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            EventTriggerOperation::Create { trigger } => DbObjectId::EventTrigger {
                name: trigger.name.clone(),
            },
            EventTriggerOperation::Drop { name } | EventTriggerOperation::SetEnabled { name, .. } => {
                DbObjectId::EventTrigger { name: name.clone() }
            }
            EventTriggerOperation::Comment(comment_op) => match comment_op {
                CommentOperation::Set { target, .. } | CommentOperation::Drop { target } => {
                    DbObjectId::EventTrigger {
                        name: target.name.clone(),
                    }
                }
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, EventTriggerOperation::Drop { .. })
    }
}

fn render_create(trigger: &EventTrigger) -> RenderedSql {
    let mut sql = format!(
        "CREATE EVENT TRIGGER {} ON {} EXECUTE FUNCTION {}();",
        quote_ident(&trigger.name),
        trigger.event,
        quote_ident(&trigger.function)
    );
    if let Some(tags) = &trigger.tags {
        if !tags.is_empty() {
            let tag_list = tags
                .iter()
                .map(|t| format!("'{}'", escape_string(t)))
                .collect::<Vec<_>>()
                .join(", ");
            sql = format!(
                "CREATE EVENT TRIGGER {} ON {} WHEN TAG IN ({}) EXECUTE FUNCTION {}();",
                quote_ident(&trigger.name),
                trigger.event,
                tag_list,
                quote_ident(&trigger.function)
            );
        }
    }
    RenderedSql::new(sql)
}
