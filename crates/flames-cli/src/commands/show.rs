use anyhow::{Context, Result, bail};
use flames_core::share::shared_result_id;

use crate::bootstrap::AppContext;
use crate::render;

/// Opens a result the way a share link would.
pub async fn run(ctx: &AppContext, target: &str) -> Result<()> {
    let id = shared_result_id(target)
        .with_context(|| format!("No result id in '{}'", target))?;

    match ctx.page.load(Some(&id)).await {
        Some(result) => {
            println!("{}", render::result_card(&result));
            Ok(())
        }
        None => bail!("Result {} could not be loaded", id),
    }
}
