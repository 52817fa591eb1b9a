use anyhow::{Context, Result};
use colored::Colorize;

use crate::bootstrap::AppContext;
use crate::render;

pub async fn run(ctx: &AppContext, id: &str) -> Result<()> {
    ctx.page
        .delete_history_item(id)
        .await
        .with_context(|| format!("Failed to delete {}", id))?;

    println!("{}", format!("✓ Deleted {}", id).green());
    println!("{}", render::history_list(&ctx.page.snapshot().await.history));
    Ok(())
}
