use super::comments::Commentable;
use crate::catalog::id::DbObjectId;
use crate::catalog::{DependsOn, utils::is_system_schema};
use anyhow::Result;
use sqlx::postgres::PgConnection;
use tracing::info;

/// A collation is immutable once created: its provider and locale strings are
/// not alterable, so the diff engine only ever creates, drops, or comments it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collation {
    pub schema: String,
    pub name: String,
    pub provider: String,
    pub locale: String,
    pub deterministic: bool,
    pub comment: Option<String>,
    pub depends_on: Vec<DbObjectId>,
}

impl DependsOn for Collation {
    fn id(&self) -> DbObjectId {
        DbObjectId::Collation {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }

    fn depends_on(&self) -> &[DbObjectId] {
        &self.depends_on
    }
}

impl Commentable for Collation {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}

pub async fn fetch(conn: &mut PgConnection) -> Result<Vec<Collation>> {
    info!("Fetching collations...");
    let rows = sqlx::query!(
        r#"
        SELECT
            n.nspname AS "schema!",
            c.collname AS "name!",
            c.collprovider::text AS "provider!",
            COALESCE(c.colliculocale, c.collcollate) AS "locale!",
            c.collisdeterministic AS "deterministic!",
            d.description AS "comment?"
        FROM pg_collation c
        JOIN pg_namespace n ON c.collnamespace = n.oid
        LEFT JOIN pg_description d ON d.objoid = c.oid AND d.objsubid = 0
        WHERE NOT EXISTS (
            SELECT 1 FROM pg_depend dep
            WHERE dep.objid = c.oid AND dep.deptype = 'e'
        )
        ORDER BY n.nspname, c.collname
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .filter(|row| !is_system_schema(&row.schema))
        .map(|row| {
            let mut depends_on = Vec::new();
            if row.schema != "public" {
                depends_on.push(DbObjectId::Schema {
                    name: row.schema.clone(),
                });
            }
            Collation {
                schema: row.schema,
                name: row.name,
                provider: row.provider,
                locale: row.locale,
                deterministic: row.deterministic,
                comment: row.comment,
                depends_on,
            }
        })
        .collect())
}
