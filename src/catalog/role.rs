use super::comments::Commentable;
use crate::catalog::id::DbObjectId;
use anyhow::Result;
use sqlx::postgres::PgConnection;
use tracing::info;

/// A login/group role. Password hashes are never read: the Integration layer
/// masks `role.password` at serialization time, so the extraction layer has
/// no business seeing it either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: String,
    pub superuser: bool,
    pub inherit: bool,
    pub create_role: bool,
    pub create_db: bool,
    pub can_login: bool,
    pub replication: bool,
    pub bypass_rls: bool,
    pub connection_limit: i32,
    pub comment: Option<String>,
}

impl Role {
    pub fn id(&self) -> DbObjectId {
        DbObjectId::Role {
            name: self.name.clone(),
        }
    }
}

impl Commentable for Role {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}

pub async fn fetch(conn: &mut PgConnection) -> Result<Vec<Role>> {
    info!("Fetching roles...");
    let rows = sqlx::query!(
        r#"
        SELECT
            r.rolname AS "name!",
            r.rolsuper AS "superuser!",
            r.rolinherit AS "inherit!",
            r.rolcreaterole AS "create_role!",
            r.rolcreatedb AS "create_db!",
            r.rolcanlogin AS "can_login!",
            r.rolreplication AS "replication!",
            r.rolbypassrls AS "bypass_rls!",
            r.rolconnlimit AS "connection_limit!",
            sd.description AS "comment?"
        FROM pg_roles r
        LEFT JOIN pg_shdescription sd ON sd.objoid = r.oid
        WHERE r.rolname NOT LIKE 'pg\_%'
        ORDER BY r.rolname
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Role {
            name: row.name,
            superuser: row.superuser,
            inherit: row.inherit,
            create_role: row.create_role,
            create_db: row.create_db,
            can_login: row.can_login,
            replication: row.replication,
            bypass_rls: row.bypass_rls,
            connection_limit: row.connection_limit,
            comment: row.comment,
        })
        .collect())
}
