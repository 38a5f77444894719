//! SQL rendering for view operations

use crate::catalog::id::DbObjectId;
use crate::diff::operations::ViewOperation;
use crate::render::{RenderedSql, Safety, SqlRenderer, quote_ident};

impl SqlRenderer for ViewOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            ViewOperation::Create {
                schema,
                name,
                definition,
                security_invoker,
                security_barrier,
            } => {
                let mut with_options = Vec::new();
                if *security_invoker {
                    with_options.push("security_invoker = true");
                }
                if *security_barrier {
                    with_options.push("security_barrier = true");
                }

                let with_clause = if !with_options.is_empty() {
                    format!(" WITH ({})", with_options.join(", "))
                } else {
                    String::new()
                };

                vec![RenderedSql {
                    sql: format!(
                        "CREATE VIEW {}.{}{} AS\n{};",
                        quote_ident(schema),
                        quote_ident(name),
                        with_clause,
                        definition.trim_end_matches(';'),
                    ),
                    safety: Safety::Safe,
                }]
            }
            ViewOperation::Drop { schema, name } => vec![RenderedSql {
                sql: format!("DROP VIEW {}.{};", quote_ident(schema), quote_ident(name)),
                safety: Safety::Safe,
            }],
            ViewOperation::Replace {
                schema,
                name,
                definition,
            } => vec![RenderedSql {
                sql: format!(
                    "CREATE OR REPLACE VIEW {}.{} AS\n{};",
                    quote_ident(schema),
                    quote_ident(name),
                    definition.trim_end_matches(';'),
                ),
                safety: Safety::Safe,
            }],
            ViewOperation::SetOption {
                schema,
                name,
                option,
                enabled,
            } => {
                let sql = if *enabled {
                    format!(
                        "ALTER VIEW {}.{} SET ({} = on);",
                        quote_ident(schema),
                        quote_ident(name),
                        option.as_str()
                    )
                } else {
                    format!(
                        "ALTER VIEW {}.{} RESET ({});",
                        quote_ident(schema),
                        quote_ident(name),
                        option.as_str()
                    )
                };
                vec![RenderedSql {
                    sql,
                    safety: Safety::Safe,
                }]
            }
            ViewOperation::Comment(op) => op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            ViewOperation::Create { schema, name, .. }
            | ViewOperation::Drop { schema, name }
            | ViewOperation::Replace { schema, name, .. }
            | ViewOperation::SetOption { schema, name, .. } => DbObjectId::View {
                schema: schema.clone(),
                name: name.clone(),
            },
            ViewOperation::Comment(op) => op.db_object_id(),
        }
    }
}
