//! Scrape the source URLs into insights and consolidate them.

use clap::Parser;
use lumina::{
    HtmlExtractor, LuminaConfig, ObservabilityConfig, init_observability, open_store,
    report_preflight, run_insights, validate_text_provider,
};
use std::process::ExitCode;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Turn the pages listed in SOURCES_FILE into insight documents.
///
/// All settings come from the environment (see `config/defaults.toml`).
#[derive(Debug, Parser)]
#[command(name = "lumina-scraper", version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let _cli = Cli::parse();
    let config = LuminaConfig::load()?;
    init_observability(&ObservabilityConfig::from(&config))?;

    let (report, generator) = validate_text_provider(&config.text_settings()?);
    let text_ok = report_preflight("Text provider", &report);
    let Some(generator) = generator.filter(|_| text_ok) else {
        return Ok(ExitCode::FAILURE);
    };

    let store = open_store(&config)?;
    let extractor = HtmlExtractor::new(FETCH_TIMEOUT)?;
    let outcome = run_insights(&config, store, std::sync::Arc::new(extractor), generator).await?;

    println!("\nTopics generated: {}", outcome.persisted().len());
    println!("{}", outcome.summary());
    Ok(ExitCode::SUCCESS)
}
