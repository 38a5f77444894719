//! SQL rendering for role operations

use crate::catalog::id::DbObjectId;
use crate::catalog::role::Role;
use crate::diff::operations::{CommentOperation, RoleAttribute, RoleOperation};
use crate::render::{RenderedSql, SqlRenderer, quote_ident};

impl SqlRenderer for RoleOperation {
    fn to_sql(&self) -> Vec<RenderedSql> {
        match self {
            RoleOperation::Create { role } => vec![render_create_role(role)],
            RoleOperation::Drop { name } => {
                vec![RenderedSql::destructive(format!(
                    "DROP ROLE {};",
                    quote_ident(name)
                ))]
            }
            RoleOperation::Alter { name, attributes } => {
                vec![render_alter_role(name, attributes)]
            }
            RoleOperation::Comment(comment_op) => comment_op.to_sql(),
        }
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            RoleOperation::Create { role } => DbObjectId::Role {
                name: role.name.clone(),
            },
            RoleOperation::Drop { name } | RoleOperation::Alter { name, .. } => DbObjectId::Role {
                name: name.clone(),
            },
            RoleOperation::Comment(comment_op) => match comment_op {
                CommentOperation::Set { target, .. } | CommentOperation::Drop { target } => {
                    DbObjectId::Role {
                        name: target.name.clone(),
                    }
                }
            },
        }
    }

    fn is_destructive(&self) -> bool {
        matches!(self, RoleOperation::Drop { .. })
    }
}

fn render_create_role(role: &Role) -> RenderedSql {
    let attrs = attribute_clauses(
        role.superuser,
        role.inherit,
        role.create_role,
        role.create_db,
        role.can_login,
        role.replication,
        role.bypass_rls,
        role.connection_limit,
    );
    RenderedSql::new(format!(
        "CREATE ROLE {} WITH {};",
        quote_ident(&role.name),
        attrs.join(" ")
    ))
}

#[allow(clippy::too_many_arguments)]
fn attribute_clauses(
    superuser: bool,
    inherit: bool,
    create_role: bool,
    create_db: bool,
    can_login: bool,
    replication: bool,
    bypass_rls: bool,
    connection_limit: i32,
) -> Vec<String> {
    vec![
        if superuser { "SUPERUSER" } else { "NOSUPERUSER" }.to_string(),
        if inherit { "INHERIT" } else { "NOINHERIT" }.to_string(),
        if create_role { "CREATEROLE" } else { "NOCREATEROLE" }.to_string(),
        if create_db { "CREATEDB" } else { "NOCREATEDB" }.to_string(),
        if can_login { "LOGIN" } else { "NOLOGIN" }.to_string(),
        if replication { "REPLICATION" } else { "NOREPLICATION" }.to_string(),
        if bypass_rls { "BYPASSRLS" } else { "NOBYPASSRLS" }.to_string(),
        format!("CONNECTION LIMIT {}", connection_limit),
    ]
}

fn render_alter_role(name: &str, attributes: &[RoleAttribute]) -> RenderedSql {
    let mut parts = Vec::new();
    for attribute in attributes {
        let clause = match attribute {
            RoleAttribute::Superuser(true) => "SUPERUSER".to_string(),
            RoleAttribute::Superuser(false) => "NOSUPERUSER".to_string(),
            RoleAttribute::Inherit(true) => "INHERIT".to_string(),
            RoleAttribute::Inherit(false) => "NOINHERIT".to_string(),
            RoleAttribute::CreateRole(true) => "CREATEROLE".to_string(),
            RoleAttribute::CreateRole(false) => "NOCREATEROLE".to_string(),
            RoleAttribute::CreateDb(true) => "CREATEDB".to_string(),
            RoleAttribute::CreateDb(false) => "NOCREATEDB".to_string(),
            RoleAttribute::CanLogin(true) => "LOGIN".to_string(),
            RoleAttribute::CanLogin(false) => "NOLOGIN".to_string(),
            RoleAttribute::Replication(true) => "REPLICATION".to_string(),
            RoleAttribute::Replication(false) => "NOREPLICATION".to_string(),
            RoleAttribute::BypassRls(true) => "BYPASSRLS".to_string(),
            RoleAttribute::BypassRls(false) => "NOBYPASSRLS".to_string(),
            RoleAttribute::ConnectionLimit(limit) => format!("CONNECTION LIMIT {}", limit),
        };
        parts.push(clause);
    }
    RenderedSql::new(format!(
        "ALTER ROLE {} WITH {};",
        quote_ident(name),
        parts.join(" ")
    ))
}
