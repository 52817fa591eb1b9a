use anyhow::{Context, Result, bail};
use flames_core::share::ShareOutcome;

use crate::bootstrap::AppContext;
use crate::render;

pub async fn run(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx
        .page
        .client()
        .get_by_id(id)
        .await
        .with_context(|| format!("Result {} could not be loaded", id))?;

    let outcome = ctx.page.share_result(&result).await;
    println!("{}", render::share_outcome(&outcome));
    if let ShareOutcome::Failed(reason) = outcome {
        bail!("Share failed: {}", reason);
    }
    Ok(())
}
