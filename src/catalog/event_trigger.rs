use super::comments::Commentable;
use crate::catalog::id::DbObjectId;
use crate::catalog::DependsOn;
use anyhow::Result;
use sqlx::postgres::PgConnection;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTrigger {
    pub name: String,
    pub event: String,
    pub enabled: String,
    pub function: String,
    pub tags: Option<Vec<String>>,
    pub comment: Option<String>,
}

impl DependsOn for EventTrigger {
    fn id(&self) -> DbObjectId {
        DbObjectId::EventTrigger {
            name: self.name.clone(),
        }
    }
    fn depends_on(&self) -> &[DbObjectId] {
        &[]
    }
}

impl Commentable for EventTrigger {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}

pub async fn fetch(conn: &mut PgConnection) -> Result<Vec<EventTrigger>> {
    info!("Fetching event triggers...");
    let rows = sqlx::query!(
        r#"
        SELECT
            t.evtname AS "name!",
            t.evtevent AS "event!",
            t.evtenabled::text AS "enabled!",
            p.proname AS "function!",
            t.evttags AS "tags?",
            d.description AS "comment?"
        FROM pg_event_trigger t
        JOIN pg_proc p ON t.evtfoid = p.oid
        LEFT JOIN pg_description d ON d.objoid = t.oid AND d.objsubid = 0
        ORDER BY t.evtname
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| EventTrigger {
            name: row.name,
            event: row.event,
            enabled: row.enabled,
            function: row.function,
            tags: row.tags,
            comment: row.comment,
        })
        .collect())
}
