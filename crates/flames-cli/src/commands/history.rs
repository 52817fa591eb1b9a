use anyhow::Result;
use colored::Colorize;

use crate::bootstrap::AppContext;
use crate::render;

pub async fn run(ctx: &AppContext) -> Result<()> {
    ctx.page.refresh_history().await;
    let state = ctx.page.snapshot().await;

    println!("{}", "Recent results".bold());
    println!("{}", render::history_list(&state.history));
    Ok(())
}
