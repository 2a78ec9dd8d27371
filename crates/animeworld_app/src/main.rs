mod cli;
mod config;
mod output;

use std::process::ExitCode;

use animeworld_engine::{ScrapeError, SiteConfig, SiteScraper};
use animeworld_logging::{aw_error, aw_info, aw_warn};
use anyhow::Context;
use clap::Parser;
use serde_json::Value;

use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, rejected_env) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(err) => {
            print_json(&output::failure("config", &format!("{err:#}")));
            return ExitCode::FAILURE;
        }
    };

    animeworld_logging::initialize(
        animeworld_logging::parse_level(&config.log_level),
        config.log_file.as_deref(),
    );
    for entry in &rejected_env {
        aw_warn!("Ignoring {}: not a number", entry);
    }
    aw_info!("Using {}", config.base_url);

    let scraper = match build_scraper(&config) {
        Ok(scraper) => scraper,
        Err(err) => {
            print_json(&output::failure("config", &format!("{err:#}")));
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            print_json(&output::failure("runtime", &err.to_string()));
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&scraper, cli.command)) {
        Ok(value) => {
            print_json(&value);
            ExitCode::SUCCESS
        }
        Err(err) => {
            aw_error!("Command failed: {}", err);
            print_json(&output::failure(err.kind().as_str(), &err.to_string()));
            ExitCode::FAILURE
        }
    }
}

/// File first, then `ANIMEWORLD_*` variables, then command line flags.
/// Also returns the environment entries that were rejected; they are logged
/// by the caller after the logger exists.
fn load_config(cli: &Cli) -> anyhow::Result<(AppConfig, Vec<String>)> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    let rejected = config.apply_process_env();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok((config, rejected))
}

fn build_scraper(config: &AppConfig) -> anyhow::Result<SiteScraper> {
    let site = SiteConfig::new(&config.base_url).context("invalid base_url")?;
    let scraper = SiteScraper::with_settings(
        site,
        config.fetch_settings(),
        config.user_agents.clone(),
        config.request_options(),
    )
    .context("building http client")?;
    Ok(scraper)
}

async fn run(scraper: &SiteScraper, command: Commands) -> Result<Value, ScrapeError> {
    let value = match command {
        Commands::Home => envelope(&scraper.extract_home().await?),
        Commands::Info { id } => envelope(&scraper.extract_details(&id).await?),
        Commands::Episodes { id, season } => {
            envelope(&scraper.extract_episodes(&id, &season).await?)
        }
        Commands::Embed { id } => envelope(&scraper.extract_embed(&id).await?),
        Commands::Search { term, full: false } => envelope(&scraper.search_suggest(&term).await?),
        Commands::Search { term, full: true } => {
            envelope(&scraper.search_full_page(&term).await?)
        }
        Commands::Category { path, page } => {
            envelope(&scraper.extract_category(&path, page).await?)
        }
    };
    Ok(value)
}

fn envelope<T: serde::Serialize>(data: &T) -> Value {
    output::success(data).unwrap_or_else(|err| output::failure("serialize", &err.to_string()))
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("Failed to serialize output: {err}"),
    }
}
