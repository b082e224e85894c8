use crate::app::{AppContext, BaseUrlSource};
use anyhow::{Context, Result};
use colored::Colorize;

pub fn show(ctx: &AppContext) -> Result<()> {
    println!("{} {}", "config dir:".bright_black(), ctx.paths.config_dir().display());
    println!(
        "{} {} ({})",
        "api url:   ".bright_black(),
        ctx.base_url,
        ctx.base_url_source
    );
    let interview = if ctx.config.interview.is_some() {
        "from config.toml"
    } else {
        "built-in"
    };
    println!(
        "{} {} questions, {}",
        "interview: ".bright_black(),
        ctx.catalog.len(),
        interview
    );
    let token = if ctx.paths.token_file().exists() {
        "saved"
    } else {
        "none"
    };
    println!("{} {}", "session:   ".bright_black(), token);
    Ok(())
}

pub fn set_url(ctx: &AppContext, url: Option<String>) -> Result<()> {
    let updated = ctx
        .config_storage
        .set_api_base_url(url)
        .with_context(|| format!("Failed to update {}", ctx.config_storage.path().display()))?;

    match &updated.api_base_url {
        Some(url) => println!("{}", format!("API URL set to {url}").green()),
        None => println!(
            "{}",
            format!("API URL reset to {}", updated.api_base_url()).green()
        ),
    }
    if ctx.base_url_source == BaseUrlSource::CommandLine {
        println!(
            "{}",
            "Note: --api-url / ZEROTH_API_BASE_URL still takes precedence.".yellow()
        );
    }
    Ok(())
}
