//! Top-level orchestration: two catalogs in, one migration script out.
//!
//! Wires together the stages spec.md §2 draws as a pipeline diagram:
//! catalog extraction (concurrent) → diff → cascade expansion → filter →
//! dependency sort → serialize.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::diff::operations::MigrationStep;
use crate::diff::{cascade, diff_all, diff_order};
use crate::integration::{self, IntegrationContext};
use crate::render::SqlRenderer;
use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

/// Runs the full pipeline against two already-connected pools and returns
/// the assembled SQL script.
pub async fn run(main_pool: &PgPool, branch_pool: &PgPool, config: &Config) -> Result<String> {
    info!("Loading catalogs...");
    let (old_catalog, new_catalog) =
        tokio::try_join!(Catalog::load(main_pool), Catalog::load(branch_pool))?;

    let steps = diff_all(&old_catalog, &new_catalog);
    let steps = cascade::expand(steps, &old_catalog, &new_catalog);

    let ctx = IntegrationContext::from_config(config);
    let steps: Vec<MigrationStep> = steps
        .into_iter()
        .filter(|step| integration::filter(&ctx, step))
        .collect();

    let ordered = diff_order(steps, &old_catalog, &new_catalog)?;

    Ok(render_script(&ordered, &ctx))
}

fn render_script(steps: &[MigrationStep], ctx: &IntegrationContext) -> String {
    let needs_routine_prefix = steps.iter().any(|step| {
        matches!(
            step,
            MigrationStep::Function(_) | MigrationStep::Aggregate(_)
        )
    });

    let mut statements: Vec<String> = Vec::new();

    if needs_routine_prefix {
        statements.push("SET check_function_bodies = false;".to_string());
    }

    for step in steps {
        let rendered = integration::serialize(ctx, step).unwrap_or_else(|| step.to_sql());
        for r in rendered {
            statements.push(r.sql);
        }
    }

    // Each rendered statement already carries its own trailing `;`
    // (see individual render/*.rs modules), so the separator is a blank
    // line only, per the output script format.
    statements.join("\n\n")
}
