use crate::catalog::id::DbObjectId;
use crate::catalog::DependsOn;
use anyhow::Result;
use sqlx::postgres::PgConnection;
use tracing::info;

/// One row of `GRANT <role> TO <member>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMembership {
    pub role: String,
    pub member: String,
    pub admin_option: bool,
}

impl DependsOn for RoleMembership {
    fn id(&self) -> DbObjectId {
        DbObjectId::RoleMembership {
            role: self.role.clone(),
            member: self.member.clone(),
        }
    }

    fn depends_on(&self) -> &[DbObjectId] {
        &[]
    }
}

pub async fn fetch(conn: &mut PgConnection) -> Result<Vec<RoleMembership>> {
    info!("Fetching role memberships...");
    let rows = sqlx::query!(
        r#"
        SELECT
            r1.rolname AS "role!",
            r2.rolname AS "member!",
            m.admin_option AS "admin_option!"
        FROM pg_auth_members m
        JOIN pg_roles r1 ON m.roleid = r1.oid
        JOIN pg_roles r2 ON m.member = r2.oid
        WHERE r1.rolname NOT LIKE 'pg\_%' AND r2.rolname NOT LIKE 'pg\_%'
        ORDER BY r1.rolname, r2.rolname
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| RoleMembership {
            role: row.role,
            member: row.member,
            admin_option: row.admin_option,
        })
        .collect())
}
