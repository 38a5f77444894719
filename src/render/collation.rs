//! SQL rendering for collation operations

use crate::catalog::collation::Collation;
use crate::catalog::id::DbObjectId;
use crate::diff::operations::{CollationOperation, CommentOperation};
use crate::render::{RenderedSql, SqlRenderer, escape_string, quote_ident};

impl SqlRenderer for CollationOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            CollationOperation::Create { collation } => vec![render_create(collation)],
            CollationOperation::Drop { schema, name } => vec![RenderedSql::destructive(format!(
                "DROP COLLATION {}.{};",
                quote_ident(schema),
                quote_ident(name)
            ))],
            CollationOperation::Comment(comment_op) => comment_op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            CollationOperation::Create { collation } => DbObjectId::Collation {
                schema: collation.schema.clone(),
                name: collation.name.clone(),
            },
            CollationOperation::Drop { schema, name } => DbObjectId::Collation {
                schema: schema.clone(),
                name: name.clone(),
            },
            CollationOperation::Comment(comment_op) => match comment_op {
                CommentOperation::Set { target, .. } | CommentOperation::Drop { target } => {
                    DbObjectId::Collation {
                        schema: target.schema.clone(),
                        name: target.name.clone(),
                    }
                }
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, CollationOperation::Drop { .. })
    }
}

fn render_create(collation: &Collation) -> RenderedSql {
    RenderedSql::new(format!(
        "CREATE COLLATION {}.{} (PROVIDER = {}, LOCALE = {}, DETERMINISTIC = {});",
        quote_ident(&collation.schema),
        quote_ident(&collation.name),
        collation.provider,
        escape_string(&collation.locale),
        collation.deterministic
    ))
}
