use super::{CommentOperation, CommentTarget, OperationKind, SqlRenderer};
use crate::catalog::id::DbObjectId;
use crate::catalog::triggers::Trigger;
use crate::render::{RenderedSql, Safety, quote_ident};

/// Identifier for a trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerIdentifier {
    pub schema: String,
    pub table: String,
    pub name: String,
}

impl TriggerIdentifier {
    pub fn new(schema: String, table: String, name: String) -> Self {
        Self {
            schema,
            table,
            name,
        }
    }

    pub fn from_trigger(trigger: &Trigger) -> Self {
        Self {
            schema: trigger.schema.clone(),
            table: trigger.table_name.clone(),
            name: trigger.name.clone(),
        }
    }
}

impl CommentTarget for TriggerIdentifier {
    const OBJECT_TYPE: &'static str = "TRIGGER";

    fn identifier(&self) -> String {
        format!(
            "\"{}\" ON \"{}\".\"{}\"",
            self.name, self.schema, self.table
        )
    }

    fn db_object_id(&self) -> DbObjectId {
        DbObjectId::Trigger {
            schema: self.schema.clone(),
            table: self.table.clone(),
            name: self.name.clone(),
        }
    }
}

/// Operations that can be performed on triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOperation {
    Create {
        trigger: Box<Trigger>,
    },
    Drop {
        identifier: TriggerIdentifier,
    },
    Replace {
        old_trigger: Box<Trigger>,
        new_trigger: Box<Trigger>,
    },
    Comment(CommentOperation<TriggerIdentifier>),
}

impl TriggerOperation {
    pub fn operation_kind(&self) -> OperationKind {
        match self {
            Self::Create { .. } => OperationKind::Create,
            Self::Drop { .. } => OperationKind::Drop,
            Self::Replace { .. } | Self::Comment(_) => OperationKind::Alter,
        }
    }
}

impl SqlRenderer for TriggerOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            // `definition` comes from pg_get_triggerdef() and is already a
            // complete CREATE TRIGGER statement with no trailing `;`.
            TriggerOperation::Create { trigger } => vec![RenderedSql {
                sql: format!("{};", trigger.definition),
                safety: Safety::Safe,
            }],
            TriggerOperation::Drop { identifier } => vec![RenderedSql {
                sql: format!(
                    "DROP TRIGGER {} ON {}.{};",
                    quote_ident(&identifier.name),
                    quote_ident(&identifier.schema),
                    quote_ident(&identifier.table)
                ),
                safety: Safety::Destructive,
            }],
            // Postgres has no ALTER TRIGGER for changing a trigger's
            // definition; replacing it means dropping and recreating.
            TriggerOperation::Replace { old_trigger, new_trigger } => vec![
                RenderedSql {
                    sql: format!(
                        "DROP TRIGGER {} ON {}.{};",
                        quote_ident(&old_trigger.name),
                        quote_ident(&old_trigger.schema),
                        quote_ident(&old_trigger.table_name)
                    ),
                    safety: Safety::Destructive,
                },
                RenderedSql {
                    sql: format!("{};", new_trigger.definition),
                    safety: Safety::Safe,
                },
            ],
            TriggerOperation::Comment(comment_op) => comment_op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            TriggerOperation::Create { trigger } => DbObjectId::Trigger {
                schema: trigger.schema.clone(),
                table: trigger.table_name.clone(),
                name: trigger.name.clone(),
            },
            TriggerOperation::Drop { identifier } => identifier.db_object_id(),
            TriggerOperation::Replace { new_trigger, .. } => DbObjectId::Trigger {
                schema: new_trigger.schema.clone(),
                table: new_trigger.table_name.clone(),
                name: new_trigger.name.clone(),
            },
            TriggerOperation::Comment(comment_op) => comment_op.db_object_id(),
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, TriggerOperation::Drop { .. })
    }
}
