//! Foreign-data objects: wrappers, servers, user mappings, and foreign tables.
//! Grouped in one module because they are always extracted and diffed together
//! -- a server always belongs to a wrapper, a user mapping always belongs to a
//! server, and none of them have an independent alter surface worth a file each.

use super::comments::Commentable;
use crate::catalog::id::DbObjectId;
use crate::catalog::DependsOn;
use anyhow::Result;
use sqlx::postgres::PgConnection;
use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignDataWrapper {
    pub name: String,
    pub handler: Option<String>,
    pub validator: Option<String>,
    pub options: HashMap<String, String>,
    pub comment: Option<String>,
}

impl DependsOn for ForeignDataWrapper {
    fn id(&self) -> DbObjectId {
        DbObjectId::ForeignDataWrapper {
            name: self.name.clone(),
        }
    }
    fn depends_on(&self) -> &[DbObjectId] {
        &[]
    }
}

impl Commentable for ForeignDataWrapper {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignServer {
    pub name: String,
    pub wrapper: String,
    pub server_type: Option<String>,
    pub server_version: Option<String>,
    /// Values that look sensitive (e.g. containing "password") are masked by
    /// the Integration layer using the `__OPTION_<KEY>__` convention.
    pub options: HashMap<String, String>,
    pub comment: Option<String>,
}

impl DependsOn for ForeignServer {
    fn id(&self) -> DbObjectId {
        DbObjectId::ForeignServer {
            name: self.name.clone(),
        }
    }
    fn depends_on(&self) -> &[DbObjectId] {
        &[]
    }
}

impl Commentable for ForeignServer {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMapping {
    pub server: String,
    pub user: String,
    pub options: HashMap<String, String>,
}

impl DependsOn for UserMapping {
    fn id(&self) -> DbObjectId {
        DbObjectId::UserMapping {
            server: self.server.clone(),
            user: self.user.clone(),
        }
    }
    fn depends_on(&self) -> &[DbObjectId] {
        &[]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignTable {
    pub schema: String,
    pub name: String,
    pub server: String,
    pub columns: Vec<(String, String)>,
    pub options: HashMap<String, String>,
    pub comment: Option<String>,
}

impl DependsOn for ForeignTable {
    fn id(&self) -> DbObjectId {
        DbObjectId::ForeignTable {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }
    fn depends_on(&self) -> &[DbObjectId] {
        &[]
    }
}

impl Commentable for ForeignTable {
    fn comment(&self) -> &Option<String> {
        &self.comment
    }
}

fn parse_options(raw: Option<Vec<String>>) -> HashMap<String, String> {
    raw.unwrap_or_default()
        .into_iter()
        .filter_map(|entry| entry.split_once('=').map(|(k, v)| (k.to_string(), v.to_string())))
        .collect()
}

pub async fn fetch_wrappers(conn: &mut PgConnection) -> Result<Vec<ForeignDataWrapper>> {
    info!("Fetching foreign data wrappers...");
    let rows = sqlx::query!(
        r#"
        SELECT
            w.fdwname AS "name!",
            h.proname AS "handler?",
            v.proname AS "validator?",
            w.fdwoptions AS "options?",
            d.description AS "comment?"
        FROM pg_foreign_data_wrapper w
        LEFT JOIN pg_proc h ON w.fdwhandler = h.oid
        LEFT JOIN pg_proc v ON w.fdwvalidator = v.oid
        LEFT JOIN pg_description d ON d.objoid = w.oid AND d.objsubid = 0
        ORDER BY w.fdwname
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ForeignDataWrapper {
            name: row.name,
            handler: row.handler,
            validator: row.validator,
            options: parse_options(row.options),
            comment: row.comment,
        })
        .collect())
}

pub async fn fetch_servers(conn: &mut PgConnection) -> Result<Vec<ForeignServer>> {
    info!("Fetching foreign servers...");
    let rows = sqlx::query!(
        r#"
        SELECT
            s.srvname AS "name!",
            w.fdwname AS "wrapper!",
            s.srvtype AS "server_type?",
            s.srvversion AS "server_version?",
            s.srvoptions AS "options?",
            d.description AS "comment?"
        FROM pg_foreign_server s
        JOIN pg_foreign_data_wrapper w ON s.srvfdw = w.oid
        LEFT JOIN pg_description d ON d.objoid = s.oid AND d.objsubid = 0
        ORDER BY s.srvname
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ForeignServer {
            name: row.name,
            wrapper: row.wrapper,
            server_type: row.server_type,
            server_version: row.server_version,
            options: parse_options(row.options),
            comment: row.comment,
        })
        .collect())
}

pub async fn fetch_user_mappings(conn: &mut PgConnection) -> Result<Vec<UserMapping>> {
    info!("Fetching user mappings...");
    let rows = sqlx::query!(
        r#"
        SELECT
            s.srvname AS "server!",
            CASE WHEN um.umuser = 0 THEN 'public' ELSE r.rolname END AS "user!",
            um.umoptions AS "options?"
        FROM pg_user_mapping um
        JOIN pg_foreign_server s ON um.umserver = s.oid
        LEFT JOIN pg_roles r ON um.umuser = r.oid
        ORDER BY s.srvname, 2
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| UserMapping {
            server: row.server,
            user: row.user.unwrap_or_else(|| "public".to_string()),
            options: parse_options(row.options),
        })
        .collect())
}

pub async fn fetch_foreign_tables(conn: &mut PgConnection) -> Result<Vec<ForeignTable>> {
    info!("Fetching foreign tables...");
    let rows = sqlx::query!(
        r#"
        SELECT
            n.nspname AS "schema!",
            c.relname AS "name!",
            s.srvname AS "server!",
            ft.ftoptions AS "options?",
            d.description AS "comment?"
        FROM pg_foreign_table ft
        JOIN pg_class c ON ft.ftrelid = c.oid
        JOIN pg_namespace n ON c.relnamespace = n.oid
        JOIN pg_foreign_server s ON ft.ftserver = s.oid
        LEFT JOIN pg_description d ON d.objoid = c.oid AND d.objsubid = 0
        ORDER BY n.nspname, c.relname
        "#
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut result = Vec::new();
    for row in rows {
        let columns = sqlx::query!(
            r#"
            SELECT a.attname AS "name!", format_type(a.atttypid, a.atttypmod) AS "data_type!"
            FROM pg_attribute a
            JOIN pg_class c ON a.attrelid = c.oid
            JOIN pg_namespace n ON c.relnamespace = n.oid
            WHERE n.nspname = $1 AND c.relname = $2 AND a.attnum > 0 AND NOT a.attisdropped
            ORDER BY a.attnum
            "#,
            row.schema,
            row.name
        )
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(|r| (r.name, r.data_type))
        .collect();

        result.push(ForeignTable {
            schema: row.schema,
            name: row.name,
            server: row.server,
            columns,
            options: parse_options(row.options),
            comment: row.comment,
        });
    }

    Ok(result)
}
