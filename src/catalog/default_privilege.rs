use crate::catalog::id::DbObjectId;
use crate::catalog::DependsOn;
use anyhow::Result;
use sqlx::postgres::PgConnection;
use std::collections::BTreeSet;
use tracing::info;

/// A default-privilege entry for one (grantor, schema, object type, grantee).
/// Kept as two explicit privilege sets -- plain and with-grant-option -- the
/// same way `catalog::grant::Grant` avoids collapsing to a single `grantable:
/// bool`: revoking the grant option is a different statement than revoking
/// the privilege.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPrivilege {
    pub grantor: String,
    pub schema: Option<String>,
    /// pg_default_acl's single-letter object type: `r` table, `S` sequence,
    /// `f` function, `T` type, `n` schema.
    pub object_type: String,
    pub grantee: String,
    pub privileges: BTreeSet<String>,
    pub privileges_with_grant: BTreeSet<String>,
}

impl DefaultPrivilege {
    pub fn key(&self) -> DbObjectId {
        DbObjectId::DefaultPrivilege {
            grantor: self.grantor.clone(),
            grantee: self.grantee.clone(),
            schema: self.schema.clone(),
            object_type: self.object_type.clone(),
        }
    }
}

impl DependsOn for DefaultPrivilege {
    fn id(&self) -> DbObjectId {
        self.key()
    }

    fn depends_on(&self) -> &[DbObjectId] {
        &[]
    }
}

pub async fn fetch(conn: &mut PgConnection) -> Result<Vec<DefaultPrivilege>> {
    info!("Fetching default privileges...");
    let rows = sqlx::query!(
        r#"
        SELECT
            r.rolname AS "grantor!",
            n.nspname AS "schema?",
            da.defaclobjtype::text AS "object_type!",
            (acl).grantee::regrole::text AS "grantee!",
            (acl).privilege_type AS "privilege!",
            (acl).is_grantable AS "is_grantable!"
        FROM pg_default_acl da
        JOIN pg_roles r ON da.defaclrole = r.oid
        LEFT JOIN pg_namespace n ON da.defaclnamespace = n.oid
        CROSS JOIN LATERAL aclexplode(da.defaclacl) AS acl
        ORDER BY r.rolname, n.nspname, da.defaclobjtype, 4
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut result: Vec<DefaultPrivilege> = Vec::new();
    for row in rows {
        let grantee = if row.grantee == "pg_catalog.\"any\"" || row.grantee == "-" {
            "public".to_string()
        } else {
            row.grantee.trim_start_matches("pg_catalog.").to_string()
        };

        let entry = result.iter_mut().find(|d| {
            d.grantor == row.grantor
                && d.schema == row.schema
                && d.object_type == row.object_type
                && d.grantee == grantee
        });

        let entry = match entry {
            Some(e) => e,
            None => {
                result.push(DefaultPrivilege {
                    grantor: row.grantor.clone(),
                    schema: row.schema.clone(),
                    object_type: row.object_type.clone(),
                    grantee: grantee.clone(),
                    privileges: BTreeSet::new(),
                    privileges_with_grant: BTreeSet::new(),
                });
                result.last_mut().unwrap()
            }
        };

        if row.is_grantable {
            entry.privileges_with_grant.insert(row.privilege);
        } else {
            entry.privileges.insert(row.privilege);
        }
    }

    Ok(result)
}
