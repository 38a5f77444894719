//! SQL rendering for publication operations

use crate::catalog::id::DbObjectId;
use crate::catalog::publication::Publication;
use crate::diff::operations::{CommentOperation, PublicationOperation, PublicationOptions};
use crate::render::{RenderedSql, SqlRenderer, quote_ident};

impl SqlRenderer for PublicationOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            PublicationOperation::Create { publication } => vec![render_create(publication)],
            PublicationOperation::Drop { name } => vec![RenderedSql::destructive(format!(
                "DROP PUBLICATION {};",
                quote_ident(name)
            ))],
            PublicationOperation::Alter {
                name,
                add_tables,
                drop_tables,
                set_options,
            } => {
                let mut stmts = Vec::new();
                if !add_tables.is_empty() {
                    let tables = add_tables
                        .iter()
                        .map(|(schema, table)| format!("{}.{}", quote_ident(schema), quote_ident(table)))
                        .collect::<Vec<_>>()
                        .join(", ");
                    stmts.push(RenderedSql::new(format!(
                        "ALTER PUBLICATION {} ADD TABLE {};",
                        quote_ident(name),
                        tables
                    )));
                }
                if !drop_tables.is_empty() {
                    let tables = drop_tables
                        .iter()
                        .map(|(schema, table)| format!("{}.{}", quote_ident(schema), quote_ident(table)))
                        .collect::<Vec<_>>()
                        .join(", ");
                    stmts.push(RenderedSql::new(format!(
                        "ALTER PUBLICATION {} DROP TABLE {};",
                        quote_ident(name),
                        tables
                    )));
                }
                if let Some(options) = set_options {
                    stmts.push(RenderedSql::new(format!(
                        "ALTER PUBLICATION {} SET ({});",
                        quote_ident(name),
                        render_options(options)
                    )));
                }
                stmts
            }
            PublicationOperation::Comment(comment_op) => comment_op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            PublicationOperation::Create { publication } => DbObjectId::Publication {
                name: publication.name.clone(),
            },
            PublicationOperation::Drop { name } | PublicationOperation::Alter { name, .. } => {
                DbObjectId::Publication { name: name.clone() }
            }
            PublicationOperation::Comment(comment_op) => match comment_op {
                CommentOperation::Set { target, .. } | CommentOperation::Drop { target } => {
                    DbObjectId::Publication {
                        name: target.name.clone(),
                    }
                }
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, PublicationOperation::Drop { .. })
    }
}

fn render_create(publication: &Publication) -> RenderedSql {
    let mut sql = format!("CREATE PUBLICATION {}", quote_ident(&publication.name));
    if publication.all_tables {
        sql.push_str(" FOR ALL TABLES");
    } else if !publication.tables.is_empty() {
        let tables = publication
            .tables
            .iter()
            .map(|(schema, table)| format!("{}.{}", quote_ident(schema), quote_ident(table)))
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(&format!(" FOR TABLE {}", tables));
    }
    sql.push_str(&format!(
        " WITH ({});",
        render_options(&PublicationOptions {
            insert: publication.insert,
            update: publication.update,
            delete: publication.delete,
            truncate: publication.truncate,
            via_root: publication.via_root,
        })
    ));
    RenderedSql::new(sql)
}

fn render_options(options: &PublicationOptions) -> String {
    let mut actions = Vec::new();
    if options.insert {
        actions.push("insert");
    }
    if options.update {
        actions.push("update");
    }
    if options.delete {
        actions.push("delete");
    }
    if options.truncate {
        actions.push("truncate");
    }
    format!(
        "publish = '{}', publish_via_partition_root = {}",
        actions.join(", "),
        options.via_root
    )
}
