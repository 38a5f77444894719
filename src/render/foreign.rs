//! SQL rendering for foreign-data objects: wrapper, server, user mapping, foreign table.
//! Grouped to match `catalog::foreign` and `diff::operations::foreign`.

use crate::catalog::id::DbObjectId;
use crate::diff::operations::{
    CommentOperation, ForeignDataWrapperOperation, ForeignServerOperation, ForeignTableOperation,
    UserMappingOperation,
};
use crate::render::{RenderedSql, SqlRenderer, escape_string, quote_ident};
use std::collections::HashMap;

fn render_options_clause(options: &HashMap<String, String>) -> String {
    let mut keys: Vec<_> = options.keys().collect();
    keys.sort();
    keys.iter()
        .map(|k| format!("{} '{}'", quote_ident(k), escape_string(&options[*k])))
        .collect::<Vec<_>>()
        .join(", ")
}

impl SqlRenderer for ForeignDataWrapperOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            ForeignDataWrapperOperation::Create { wrapper } => {
                let mut sql = format!("CREATE FOREIGN DATA WRAPPER {}", quote_ident(&wrapper.name));
                if let Some(handler) = &wrapper.handler {
                    sql.push_str(&format!(" HANDLER {}", quote_ident(handler)));
                }
                if let Some(validator) = &wrapper.validator {
                    sql.push_str(&format!(" VALIDATOR {}", quote_ident(validator)));
                }
                if !wrapper.options.is_empty() {
                    sql.push_str(&format!(" OPTIONS ({})", render_options_clause(&wrapper.options)));
                }
                sql.push(';');
                vec![RenderedSql::new(sql)]
            }
            ForeignDataWrapperOperation::Drop { name } => vec![RenderedSql::destructive(format!(
                "DROP FOREIGN DATA WRAPPER {};",
                quote_ident(name)
            ))],
            ForeignDataWrapperOperation::AlterOptions { name, options } => {
                vec![RenderedSql::new(format!(
                    "ALTER FOREIGN DATA WRAPPER {} OPTIONS ({});",
                    quote_ident(name),
                    render_options_clause(options)
                ))]
            }
            ForeignDataWrapperOperation::Comment(comment_op) => comment_op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            ForeignDataWrapperOperation::Create { wrapper } => DbObjectId::ForeignDataWrapper {
                name: wrapper.name.clone(),
            },
            ForeignDataWrapperOperation::Drop { name }
            | ForeignDataWrapperOperation::AlterOptions { name, .. } => DbObjectId::ForeignDataWrapper {
                name: name.clone(),
            },
            ForeignDataWrapperOperation::Comment(comment_op) => match comment_op {
                CommentOperation::Set { target, .. } | CommentOperation::Drop { target } => {
                    DbObjectId::ForeignDataWrapper {
                        name: target.name.clone(),
                    }
                }
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, ForeignDataWrapperOperation::Drop { .. })
    }
}

impl SqlRenderer for ForeignServerOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            ForeignServerOperation::Create { server } => {
                let mut sql = format!("CREATE SERVER {}", quote_ident(&server.name));
                if let Some(server_type) = &server.server_type {
                    sql.push_str(&format!(" TYPE '{}'", escape_string(server_type)));
                }
                if let Some(version) = &server.server_version {
                    sql.push_str(&format!(" VERSION '{}'", escape_string(version)));
                }
                sql.push_str(&format!(" FOREIGN DATA WRAPPER {}", quote_ident(&server.wrapper)));
                if !server.options.is_empty() {
                    sql.push_str(&format!(" OPTIONS ({})", render_options_clause(&server.options)));
                }
                sql.push(';');
                vec![RenderedSql::new(sql)]
            }
            ForeignServerOperation::Drop { name } => vec![RenderedSql::destructive(format!(
                "DROP SERVER {};",
                quote_ident(name)
            ))],
            ForeignServerOperation::AlterOptions { name, options } => vec![RenderedSql::new(format!(
                "ALTER SERVER {} OPTIONS ({});",
                quote_ident(name),
                render_options_clause(options)
            ))],
            ForeignServerOperation::Comment(comment_op) => comment_op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            ForeignServerOperation::Create { server } => DbObjectId::ForeignServer {
                name: server.name.clone(),
            },
            ForeignServerOperation::Drop { name } | ForeignServerOperation::AlterOptions { name, .. } => {
                DbObjectId::ForeignServer { name: name.clone() }
            }
            ForeignServerOperation::Comment(comment_op) => match comment_op {
                CommentOperation::Set { target, .. } | CommentOperation::Drop { target } => {
                    DbObjectId::ForeignServer {
                        name: target.name.clone(),
                    }
                }
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, ForeignServerOperation::Drop { .. })
    }
}

impl SqlRenderer for UserMappingOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            UserMappingOperation::Create { mapping } => {
                let mut sql = format!(
                    "CREATE USER MAPPING FOR {} SERVER {}",
                    quote_ident(&mapping.user),
                    quote_ident(&mapping.server)
                );
                if !mapping.options.is_empty() {
                    sql.push_str(&format!(" OPTIONS ({})", render_options_clause(&mapping.options)));
                }
                sql.push(';');
                vec![RenderedSql::new(sql)]
            }
            UserMappingOperation::Drop { server, user } => vec![RenderedSql::destructive(format!(
                "DROP USER MAPPING FOR {} SERVER {};",
                quote_ident(user),
                quote_ident(server)
            ))],
            UserMappingOperation::AlterOptions {
                server,
                user,
                options,
            } => vec![RenderedSql::new(format!(
                "ALTER USER MAPPING FOR {} SERVER {} OPTIONS ({});",
                quote_ident(user),
                quote_ident(server),
                render_options_clause(options)
            ))],
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            UserMappingOperation::Create { mapping } => DbObjectId::UserMapping {
                server: mapping.server.clone(),
                user: mapping.user.clone(),
            },
            UserMappingOperation::Drop { server, user }
            | UserMappingOperation::AlterOptions { server, user, .. } => DbObjectId::UserMapping {
                server: server.clone(),
                user: user.clone(),
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, UserMappingOperation::Drop { .. })
    }
}

impl SqlRenderer for ForeignTableOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            ForeignTableOperation::Create { table } => {
                let columns = table
                    .columns
                    .iter()
                    .map(|(name, data_type)| format!("{} {}", quote_ident(name), data_type))
                    .collect::<Vec<_>>()
                    .join(", ");
                let mut sql = format!(
                    "CREATE FOREIGN TABLE {}.{} ({}) SERVER {}",
                    quote_ident(&table.schema),
                    quote_ident(&table.name),
                    columns,
                    quote_ident(&table.server)
                );
                if !table.options.is_empty() {
                    sql.push_str(&format!(" OPTIONS ({})", render_options_clause(&table.options)));
                }
                sql.push(';');
                vec![RenderedSql::new(sql)]
            }
            ForeignTableOperation::Drop { schema, name } => vec![RenderedSql::destructive(format!(
                "DROP FOREIGN TABLE {}.{};",
                quote_ident(schema),
                quote_ident(name)
            ))],
            ForeignTableOperation::AlterOptions {
                schema,
                name,
                options,
            } => vec![RenderedSql::new(format!(
                "ALTER FOREIGN TABLE {}.{} OPTIONS ({});",
                quote_ident(schema),
                quote_ident(name),
                render_options_clause(options)
            ))],
            ForeignTableOperation::Comment(comment_op) => comment_op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            ForeignTableOperation::Create { table } => DbObjectId::ForeignTable {
                schema: table.schema.clone(),
                name: table.name.clone(),
            },
            ForeignTableOperation::Drop { schema, name }
            | ForeignTableOperation::AlterOptions { schema, name, .. } => DbObjectId::ForeignTable {
                schema: schema.clone(),
                name: name.clone(),
            },
            ForeignTableOperation::Comment(comment_op) => match comment_op {
                CommentOperation::Set { target, .. } | CommentOperation::Drop { target } => {
                    DbObjectId::ForeignTable {
                        schema: target.schema.clone(),
                        name: target.name.clone(),
                    }
                }
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, ForeignTableOperation::Drop { .. })
    }
}
