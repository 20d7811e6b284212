//! `batch` subcommand: run a JSON file of queries.

use std::path::Path;

use anyhow::{Context, Result};

use geopath_lib::PathQuery;

use super::{friendly_error, CommandContext};

/// Read a JSON array of queries from `file`.
pub fn load_queries(file: &Path) -> Result<Vec<PathQuery>> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read batch file {}", file.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("batch file {} is not a JSON array of queries", file.display()))
}

pub async fn handle_batch(ctx: &CommandContext, file: &Path) -> Result<()> {
    let queries = load_queries(file)?;
    tracing::debug!(count = queries.len(), file = %file.display(), "running batch");
    let results = ctx
        .service
        .batch_find(&queries, &ctx.owner)
        .await
        .map_err(friendly_error)?;
    println!("{}", ctx.renderer.batch(&results)?);
    Ok(())
}
