use anyhow::{Context, Result};
use chrono::{Local, TimeZone, Utc};
use colored::Colorize;

use crate::bootstrap::AppContext;

pub async fn show(ctx: &AppContext) -> Result<()> {
    let session = ctx
        .sessions
        .current_session()
        .await
        .context("Failed to read the session record")?;

    let Some(session) = session else {
        println!("{}", "No session yet; one is created on the next request.".bright_black());
        return Ok(());
    };

    let expires = Local
        .timestamp_millis_opt(session.expires_at)
        .single()
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| session.expires_at.to_string());
    let status = if session.is_valid_at(Utc::now().timestamp_millis()) {
        "active".green()
    } else {
        "expired".yellow()
    };

    println!("Session: {}", session.id.bold());
    println!("Expires: {} ({})", expires, status);
    println!(
        "{}",
        format!("New sessions last {} seconds", ctx.config.session_ttl_secs).bright_black()
    );
    Ok(())
}

pub async fn reset(ctx: &AppContext) -> Result<()> {
    ctx.sessions
        .clear_session()
        .await
        .context("Failed to clear the session record")?;
    println!("{}", "✓ Session cleared".green());
    Ok(())
}
