use super::comments::Commentable;
use crate::catalog::id::DbObjectId;
use crate::catalog::utils::is_system_schema;
use crate::catalog::DependsOn;
use anyhow::Result;
use sqlx::postgres::PgConnection;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub name: String,
    pub all_tables: bool,
    pub insert: bool,
    pub update: bool,
    pub delete: bool,
    pub truncate: bool,
    pub via_root: bool,
    pub tables: Vec<(String, String)>,
    pub comment: Option<String>,
    pub depends_on: Vec<DbObjectId>,
}

impl DependsOn for Publication {
    fn id(&self) -> DbObjectId {
        DbObjectId::Publication {
            name: self.name.clone(),
        }
    }

    fn depends_on(&self) -> &[DbObjectId] {
        &self.depends_on
    }
}

impl Commentable for Publication {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}

pub async fn fetch(conn: &mut PgConnection) -> Result<Vec<Publication>> {
    info!("Fetching publications...");
    let rows = sqlx::query!(
        r#"
        SELECT
            p.pubname AS "name!",
            p.puballtables AS "all_tables!",
            p.pubinsert AS "insert!",
            p.pubupdate AS "update!",
            p.pubdelete AS "delete!",
            p.pubtruncate AS "truncate!",
            p.pubviaroot AS "via_root!",
            d.description AS "comment?"
        FROM pg_publication p
        LEFT JOIN pg_description d ON d.objoid = p.oid AND d.objsubid = 0
        ORDER BY p.pubname
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut result = Vec::new();
    for row in rows {
        let tables = if row.all_tables {
            Vec::new()
        } else {
            sqlx::query!(
                r#"
                SELECT n.nspname AS "schema!", c.relname AS "name!"
                FROM pg_publication_rel pr
                JOIN pg_class c ON pr.prrelid = c.oid
                JOIN pg_namespace n ON c.relnamespace = n.oid
                JOIN pg_publication p ON pr.prpubid = p.oid
                WHERE p.pubname = $1
                ORDER BY n.nspname, c.relname
                "#,
                row.name
            )
            .fetch_all(&mut *conn)
            .await?
            .into_iter()
            .map(|r| (r.schema, r.name))
            .collect()
        };

        let mut depends_on: Vec<DbObjectId> = tables
            .iter()
            .filter(|(schema, _)| !is_system_schema(schema))
            .map(|(schema, name)| DbObjectId::Table {
                schema: schema.clone(),
                name: name.clone(),
            })
            .collect();
        depends_on.sort();
        depends_on.dedup();

        result.push(Publication {
            name: row.name,
            all_tables: row.all_tables,
            insert: row.insert,
            update: row.update,
            delete: row.delete,
            truncate: row.truncate,
            via_root: row.via_root,
            tables,
            comment: row.comment,
            depends_on,
        });
    }

    Ok(result)
}
