use anyhow::{Result, bail};
use colored::Colorize;
use flames_application::CalculateOutcome;

use crate::bootstrap::AppContext;
use crate::render;

pub async fn run(ctx: &AppContext, name_one: &str, name_two: &str) -> Result<()> {
    match ctx.page.calculate(name_one, name_two).await {
        CalculateOutcome::Computed(result) => {
            println!("{}", render::result_card(&result));
            if result.result.is_romantic() {
                println!("{}", render::celebration_banner());
            }
            Ok(())
        }
        CalculateOutcome::Invalid(errors) => {
            eprintln!("{}", render::field_errors(&errors));
            bail!("Invalid names: {}", errors)
        }
        CalculateOutcome::Failed => {
            eprintln!(
                "{}",
                "The FLAMES service did not return a result. Please try again.".red()
            );
            bail!("Calculation failed")
        }
        CalculateOutcome::Superseded => bail!("Calculation was cancelled"),
    }
}
