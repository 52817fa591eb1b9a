use anyhow::Result;
use clap::{Parser, Subcommand};

mod bootstrap;
mod commands;
mod logging;
mod render;

#[derive(Parser, Debug)]
#[command(name = "flames")]
#[command(about = "FLAMES - find out what two names are destined to be", long_about = None)]
struct Cli {
    /// Base URL of the FLAMES service (overrides config and FLAMES_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Calculate the FLAMES result for two names
    #[command(alias = "calculate")]
    Calc {
        name_one: String,
        name_two: String,
    },
    /// List this session's past results
    History,
    /// Delete a result from the history
    Delete { id: String },
    /// Show a result by id or share link
    Show {
        #[arg(value_name = "ID|URL")]
        target: String,
    },
    /// Share a result by id
    Share { id: String },
    /// Inspect or reset the local session
    Session {
        #[command(subcommand)]
        action: Option<SessionAction>,
    },
    /// Interactive calculator page
    Interactive {
        /// Open a shared result on start-up
        #[arg(long, value_name = "ID|URL")]
        shared: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum SessionAction {
    /// Print the stored session record
    Show,
    /// Drop the stored session; the next request starts a new one
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = match &cli.command {
        Commands::Interactive { .. } => Some(logging::init_file()?),
        _ => {
            logging::init_stderr();
            None
        }
    };

    let ctx = bootstrap::build(cli.api_base_url)?;

    match cli.command {
        Commands::Calc { name_one, name_two } => {
            commands::calculate::run(&ctx, &name_one, &name_two).await?
        }
        Commands::History => commands::history::run(&ctx).await?,
        Commands::Delete { id } => commands::delete::run(&ctx, &id).await?,
        Commands::Show { target } => commands::show::run(&ctx, &target).await?,
        Commands::Share { id } => commands::share::run(&ctx, &id).await?,
        Commands::Session { action } => match action.unwrap_or(SessionAction::Show) {
            SessionAction::Show => commands::session::show(&ctx).await?,
            SessionAction::Reset => commands::session::reset(&ctx).await?,
        },
        Commands::Interactive { shared } => {
            commands::interactive::run(ctx, shared.as_deref()).await?
        }
    }

    Ok(())
}
