//! `history` subcommand: page through the owner's stored paths.

use anyhow::Result;

use super::{friendly_error, CommandContext};

pub async fn handle_history(ctx: &CommandContext, page: usize, page_size: usize) -> Result<()> {
    let history = ctx
        .service
        .history(&ctx.owner, page, page_size)
        .await
        .map_err(friendly_error)?;
    println!("{}", ctx.renderer.history(&history, page)?);
    Ok(())
}
