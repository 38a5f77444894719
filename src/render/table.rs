//! SQL rendering for table operations

use crate::catalog::id::DbObjectId;
use crate::diff::operations::{ColumnAction, TableOperation};
use crate::render::{RenderedSql, Safety, SqlRenderer, quote_ident};

impl SqlRenderer for TableOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            TableOperation::Create {
                schema,
                name,
                columns,
                primary_key,
            } => {
                // Create a temporary Table struct to use with shared rendering
                let table = crate::catalog::table::Table::new(
                    schema.clone(),
                    name.clone(),
                    columns.clone(),
                    primary_key.clone(),
                    None,   // comment
                    vec![], // dependencies
                );

                vec![RenderedSql {
                    sql: crate::render::sql::render_create_table(&table),
                    safety: Safety::Safe,
                }]
            }
            TableOperation::Drop { schema, name } => vec![RenderedSql {
                sql: format!("DROP TABLE {}.{};", quote_ident(schema), quote_ident(name)),
                safety: Safety::Destructive,
            }],
            TableOperation::Alter {
                schema,
                name,
                actions,
            } => actions
                .iter()
                .map(|action| render_column_action(action, schema, name))
                .collect(),
            TableOperation::Comment(op) => op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            TableOperation::Create { schema, name, .. }
            | TableOperation::Drop { schema, name }
            | TableOperation::Alter { schema, name, .. } => DbObjectId::Table {
                schema: schema.clone(),
                name: name.clone(),
            },
            TableOperation::Comment(op) => op.db_object_id(),
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, TableOperation::Drop { .. })
    }
}

fn render_column_action(action: &ColumnAction, schema: &str, table: &str) -> RenderedSql {
    match action {
        ColumnAction::Add { column } => {
            let default_clause = match &column.default {
                Some(default) => format!(" DEFAULT {}", default),
                None => String::new(),
            };

            let not_null_clause = if column.not_null { " NOT NULL" } else { "" };

            let generated_clause = match &column.generated {
                Some(expr) => format!(" GENERATED ALWAYS AS ({}) STORED", expr),
                None => String::new(),
            };

            RenderedSql {
                sql: format!(
                    "ALTER TABLE {}.{} ADD COLUMN {} {}{}{}{};",
                    quote_ident(schema),
                    quote_ident(table),
                    quote_ident(&column.name),
                    column.data_type,
                    generated_clause,
                    default_clause,
                    not_null_clause
                ),
                safety: Safety::Safe,
            }
        }
        ColumnAction::Drop { name } => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} DROP COLUMN IF EXISTS {};",
                quote_ident(schema),
                quote_ident(table),
                quote_ident(name)
            ),
            safety: Safety::Destructive,
        },
        ColumnAction::SetNotNull { name } => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} ALTER COLUMN {} SET NOT NULL;",
                quote_ident(schema),
                quote_ident(table),
                quote_ident(name)
            ),
            safety: Safety::Safe,
        },
        ColumnAction::DropNotNull { name } => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} ALTER COLUMN {} DROP NOT NULL;",
                quote_ident(schema),
                quote_ident(table),
                quote_ident(name)
            ),
            safety: Safety::Safe,
        },
        ColumnAction::SetDefault { name, default } => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} ALTER COLUMN {} SET DEFAULT {};",
                quote_ident(schema),
                quote_ident(table),
                quote_ident(name),
                default
            ),
            safety: Safety::Safe,
        },
        ColumnAction::DropDefault { name } => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} ALTER COLUMN {} DROP DEFAULT;",
                quote_ident(schema),
                quote_ident(table),
                quote_ident(name)
            ),
            safety: Safety::Safe,
        },
        ColumnAction::DropGenerated { name } => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} ALTER COLUMN {} DROP EXPRESSION;",
                quote_ident(schema),
                quote_ident(table),
                quote_ident(name)
            ),
            safety: Safety::Destructive,
        },
        ColumnAction::AlterType { name, new_type } => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} ALTER COLUMN {} TYPE {};",
                quote_ident(schema),
                quote_ident(table),
                quote_ident(name),
                new_type
            ),
            safety: Safety::Destructive,
        },
        ColumnAction::AddPrimaryKey { constraint } => {
            let pk_cols = constraint
                .columns
                .iter()
                .map(|col| quote_ident(col))
                .collect::<Vec<_>>()
                .join(", ");

            RenderedSql {
                sql: format!(
                    "ALTER TABLE {}.{} ADD CONSTRAINT {} PRIMARY KEY ({});",
                    quote_ident(schema),
                    quote_ident(table),
                    quote_ident(&constraint.name),
                    pk_cols
                ),
                safety: Safety::Safe,
            }
        }
        ColumnAction::DropPrimaryKey { name } => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} DROP CONSTRAINT {};",
                quote_ident(schema),
                quote_ident(table),
                quote_ident(name)
            ),
            safety: Safety::Destructive,
        },
        ColumnAction::EnableRls => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} ENABLE ROW LEVEL SECURITY;",
                quote_ident(schema),
                quote_ident(table)
            ),
            safety: Safety::Safe,
        },
        ColumnAction::DisableRls => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} DISABLE ROW LEVEL SECURITY;",
                quote_ident(schema),
                quote_ident(table)
            ),
            safety: Safety::Destructive,
        },
        ColumnAction::ForceRls => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} FORCE ROW LEVEL SECURITY;",
                quote_ident(schema),
                quote_ident(table)
            ),
            safety: Safety::Safe,
        },
        ColumnAction::NoForceRls => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} NO FORCE ROW LEVEL SECURITY;",
                quote_ident(schema),
                quote_ident(table)
            ),
            safety: Safety::Safe,
        },
        ColumnAction::SetOwner { owner } => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} OWNER TO {};",
                quote_ident(schema),
                quote_ident(table),
                quote_ident(owner)
            ),
            safety: Safety::Safe,
        },
        ColumnAction::SetLogged => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} SET LOGGED;",
                quote_ident(schema),
                quote_ident(table)
            ),
            safety: Safety::Safe,
        },
        ColumnAction::SetUnlogged => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} SET UNLOGGED;",
                quote_ident(schema),
                quote_ident(table)
            ),
            safety: Safety::Destructive,
        },
        ColumnAction::SetStorageParams { params } => {
            let clause = params
                .iter()
                .map(|(k, v)| format!("{} = {}", k, v))
                .collect::<Vec<_>>()
                .join(", ");

            RenderedSql {
                sql: format!(
                    "ALTER TABLE {}.{} SET ({});",
                    quote_ident(schema),
                    quote_ident(table),
                    clause
                ),
                safety: Safety::Safe,
            }
        }
        ColumnAction::ResetStorageParams { keys } => RenderedSql {
            sql: format!(
                "ALTER TABLE {}.{} RESET ({});",
                quote_ident(schema),
                quote_ident(table),
                keys.join(", ")
            ),
            safety: Safety::Safe,
        },
        ColumnAction::SetReplicaIdentity { identity } => {
            let clause = match identity {
                crate::catalog::table::ReplicaIdentity::Default => "DEFAULT".to_string(),
                crate::catalog::table::ReplicaIdentity::Nothing => "NOTHING".to_string(),
                crate::catalog::table::ReplicaIdentity::Full => "FULL".to_string(),
                crate::catalog::table::ReplicaIdentity::Index(index_name) => {
                    format!("USING INDEX {}", quote_ident(index_name))
                }
            };

            RenderedSql {
                sql: format!(
                    "ALTER TABLE {}.{} REPLICA IDENTITY {};",
                    quote_ident(schema),
                    quote_ident(table),
                    clause
                ),
                safety: Safety::Safe,
            }
        }
        ColumnAction::Comment(op) => op.to_sql()[0].clone(),
    }
}
