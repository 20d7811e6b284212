//! `get` and `delete` subcommands for single stored paths.

use anyhow::Result;

use super::{friendly_error, CommandContext};

pub async fn handle_get(ctx: &CommandContext, id: &str) -> Result<()> {
    let record = ctx
        .service
        .get(id, &ctx.owner)
        .await
        .map_err(friendly_error)?;
    println!("{}", ctx.renderer.record(&record)?);
    Ok(())
}

pub async fn handle_delete(ctx: &CommandContext, id: &str) -> Result<()> {
    ctx.service
        .delete(id, &ctx.owner)
        .await
        .map_err(friendly_error)?;
    println!("{}", ctx.renderer.deleted(id)?);
    Ok(())
}
