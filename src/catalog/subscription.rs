use super::comments::Commentable;
use crate::catalog::id::DbObjectId;
use crate::catalog::DependsOn;
use anyhow::Result;
use sqlx::postgres::PgConnection;
use tracing::info;

/// `conninfo` holds a libpq connection string that typically carries a
/// password; the Integration layer masks it before the script is ever
/// serialized, so the value read here is treated as opaque, not displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub name: String,
    pub conninfo: String,
    pub enabled: bool,
    pub publications: Vec<String>,
    pub synchronous_commit: String,
    pub comment: Option<String>,
}

impl DependsOn for Subscription {
    fn id(&self) -> DbObjectId {
        DbObjectId::Subscription {
            name: self.name.clone(),
        }
    }

    fn depends_on(&self) -> &[DbObjectId] {
        &[]
    }
}

impl Commentable for Subscription {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}

pub async fn fetch(conn: &mut PgConnection) -> Result<Vec<Subscription>> {
    info!("Fetching subscriptions...");
    let rows = sqlx::query!(
        r#"
        SELECT
            s.subname AS "name!",
            s.subconninfo AS "conninfo!",
            s.subenabled AS "enabled!",
            s.subpublications AS "publications!",
            s.subsynccommit AS "synchronous_commit!",
            d.description AS "comment?"
        FROM pg_subscription s
        LEFT JOIN pg_description d ON d.objoid = s.oid AND d.objsubid = 0
        ORDER BY s.subname
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Subscription {
            name: row.name,
            conninfo: row.conninfo,
            enabled: row.enabled,
            publications: row.publications,
            synchronous_commit: row.synchronous_commit,
            comment: row.comment,
        })
        .collect())
}
