use super::comments::Commentable;
use crate::catalog::id::DbObjectId;
use crate::catalog::utils::is_system_schema;
use crate::catalog::{DependsOn, utils::DependencyBuilder};
use anyhow::Result;
use sqlx::postgres::PgConnection;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedView {
    pub schema: String,
    pub name: String,
    pub definition: String,
    pub comment: Option<String>,
    pub depends_on: Vec<DbObjectId>,
}

impl DependsOn for MaterializedView {
    fn id(&self) -> DbObjectId {
        DbObjectId::MaterializedView {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }

    fn depends_on(&self) -> &[DbObjectId] {
        &self.depends_on
    }
}

impl Commentable for MaterializedView {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}

pub async fn fetch(conn: &mut PgConnection) -> Result<Vec<MaterializedView>> {
    info!("Fetching materialized views...");
    let rows = sqlx::query!(
        r#"
        SELECT
            n.nspname AS "schema!",
            c.relname AS "name!",
            pg_get_viewdef(c.oid, true) AS "definition!",
            d.description AS "comment?"
        FROM pg_class c
        JOIN pg_namespace n ON c.relnamespace = n.oid
        LEFT JOIN pg_description d ON d.objoid = c.oid AND d.objsubid = 0
        WHERE c.relkind = 'm'
        ORDER BY n.nspname, c.relname
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .filter(|row| !is_system_schema(&row.schema))
        .map(|row| {
            let depends_on = DependencyBuilder::new(row.schema.clone()).build();
            MaterializedView {
                schema: row.schema,
                name: row.name,
                definition: row.definition.trim_end_matches(';').to_string(),
                comment: row.comment,
                depends_on,
            }
        })
        .collect())
}
