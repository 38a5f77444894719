//! SQL rendering for materialized view operations

use crate::catalog::id::DbObjectId;
use crate::diff::operations::{CommentOperation, MaterializedViewOperation};
use crate::render::{RenderedSql, SqlRenderer, quote_ident};

impl SqlRenderer for MaterializedViewOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            MaterializedViewOperation::Create {
                schema,
                name,
                definition,
            } => vec![render_create(schema, name, definition)],
            MaterializedViewOperation::Drop { schema, name } => {
                vec![RenderedSql::destructive(format!(
                    "DROP MATERIALIZED VIEW {}.{};",
                    quote_ident(schema),
                    quote_ident(name)
                ))]
            }
            MaterializedViewOperation::Replace {
                schema,
                name,
                definition,
            } => vec![
                RenderedSql::destructive(format!(
                    "DROP MATERIALIZED VIEW {}.{};",
                    quote_ident(schema),
                    quote_ident(name)
                )),
                render_create(schema, name, definition),
            ],
            MaterializedViewOperation::Comment(comment_op) => comment_op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            MaterializedViewOperation::Create { schema, name, .. }
            | MaterializedViewOperation::Drop { schema, name }
            | MaterializedViewOperation::Replace { schema, name, .. } => DbObjectId::MaterializedView {
                schema: schema.clone(),
                name: name.clone(),
            },
            MaterializedViewOperation::Comment(comment_op) => match comment_op {
                CommentOperation::Set { target, .. } | CommentOperation::Drop { target } => {
                    DbObjectId::MaterializedView {
                        schema: target.schema.clone(),
                        name: target.name.clone(),
                    }
                }
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(
            self,
            MaterializedViewOperation::Drop { .. } | MaterializedViewOperation::Replace { .. }
        )
    }
}

fn render_create(schema: &str, name: &str, definition: &str) -> RenderedSql {
    RenderedSql::new(format!(
        "CREATE MATERIALIZED VIEW {}.{} AS {} WITH DATA;",
        quote_ident(schema),
        quote_ident(name),
        definition
    ))
}
