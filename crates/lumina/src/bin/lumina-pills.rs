//! Generate knowledge pills for the insights.

use clap::Parser;
use lumina::{
    ImageGenerator, LuminaConfig, NoInfographics, ObservabilityConfig, init_observability,
    open_store, report_preflight, run_pills, validate_imagen, validate_text_provider,
};
use std::process::ExitCode;
use std::sync::Arc;

/// Build a short text, call to action and infographic for every insight.
///
/// All settings come from the environment (see `config/defaults.toml`).
#[derive(Debug, Parser)]
#[command(name = "lumina-pills", version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let _cli = Cli::parse();
    let config = LuminaConfig::load()?;
    init_observability(&ObservabilityConfig::from(&config))?;

    let (text_report, generator) = validate_text_provider(&config.text_settings()?);
    let text_ok = report_preflight("Text provider", &text_report);
    let Some(generator) = generator.filter(|_| text_ok) else {
        return Ok(ExitCode::FAILURE);
    };

    let (imagen_report, imagen) = validate_imagen(&config.imagen_settings()?).await;
    let imagen_ok = report_preflight("Imagen", &imagen_report);
    let image: Arc<dyn ImageGenerator> = match imagen.filter(|_| imagen_ok) {
        Some(client) => Arc::new(client),
        None => {
            tracing::warn!("Imagen unavailable; pills will be generated without infographics");
            Arc::new(NoInfographics)
        }
    };

    if *config.skip_pills() {
        println!("SKIP_PILL_GENERATION=true, keeping existing pills");
        return Ok(ExitCode::SUCCESS);
    }

    let store = open_store(&config)?;
    let outcome = run_pills(&config, store, generator, image).await?;

    println!("\nPills generated: {}", outcome.persisted().len());
    for key in outcome.persisted() {
        println!("  - {}", key);
    }
    println!("{}", outcome.summary());
    Ok(ExitCode::SUCCESS)
}
