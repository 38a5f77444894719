//! SQL rendering for `ALTER DEFAULT PRIVILEGES` operations

use crate::catalog::id::DbObjectId;
use crate::diff::operations::DefaultPrivilegeOperation;
use crate::render::{RenderedSql, SqlRenderer, quote_ident};

fn object_type_plural(object_type: &str) -> &'static str {
    match object_type {
        "r" => "TABLES",
        "S" => "SEQUENCES",
        "f" => "FUNCTIONS",
        "T" => "TYPES",
        "n" => "SCHEMAS",
        _ => "TABLES",
    }
}

fn for_clause(grantor: &str, schema: &Option<String>) -> String {
    let mut clause = format!("FOR ROLE {}", quote_ident(grantor));
    if let Some(schema) = schema {
        clause.push_str(&format!(" IN SCHEMA {}", quote_ident(schema)));
    }
    clause
}

impl SqlRenderer for DefaultPrivilegeOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            DefaultPrivilegeOperation::Grant {
                grantor,
                schema,
                object_type,
                grantee,
                privileges,
                with_grant_option,
            } => {
                let mut sql = format!(
                    "ALTER DEFAULT PRIVILEGES {} GRANT {} ON {} TO {}",
                    for_clause(grantor, schema),
                    privileges.join(", "),
                    object_type_plural(object_type),
                    quote_ident(grantee)
                );
                if *with_grant_option {
                    sql.push_str(" WITH GRANT OPTION");
                }
                sql.push(';');
                vec![RenderedSql::new(sql)]
            }
            DefaultPrivilegeOperation::Revoke {
                grantor,
                schema,
                object_type,
                grantee,
                privileges,
            } => vec![RenderedSql::destructive(format!(
                "ALTER DEFAULT PRIVILEGES {} REVOKE {} ON {} FROM {};",
                for_clause(grantor, schema),
                privileges.join(", "),
                object_type_plural(object_type),
                quote_ident(grantee)
            ))],
            DefaultPrivilegeOperation::RevokeGrantOptionOnly {
                grantor,
                schema,
                object_type,
                grantee,
                privileges,
            } => vec![RenderedSql::new(format!(
                "ALTER DEFAULT PRIVILEGES {} REVOKE GRANT OPTION FOR {} ON {} FROM {};",
                for_clause(grantor, schema),
                privileges.join(", "),
                object_type_plural(object_type),
                quote_ident(grantee)
            ))],
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        self.db_object_id()
    }

    fn is_destructive(&self) -> bool {
        matches!(self, DefaultPrivilegeOperation::Revoke { .. })
    }
}
