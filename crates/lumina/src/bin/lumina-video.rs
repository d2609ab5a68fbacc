//! Generate video scripts for the insights, then videos for the scripts.

use clap::Parser;
use lumina::{
    LuminaConfig, ObservabilityConfig, cancel_on_ctrl_c, init_observability, open_store,
    report_preflight, run_scripts, run_videos, validate_text_provider, validate_veo,
};
use std::process::ExitCode;
use std::sync::Arc;

/// Write a script per insight and render each script as a multi-scene video.
///
/// All settings come from the environment (see `config/defaults.toml`).
#[derive(Debug, Parser)]
#[command(name = "lumina-video", version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let _cli = Cli::parse();
    let config = LuminaConfig::load()?;
    init_observability(&ObservabilityConfig::from(&config))?;

    let (text_report, generator) = validate_text_provider(&config.text_settings()?);
    let text_ok = report_preflight("Text provider", &text_report);
    let (veo_report, veo) = validate_veo(&config.veo_settings()?).await;
    let veo_ok = report_preflight("Video backend", &veo_report);

    let (Some(generator), Some(veo)) = (generator, veo) else {
        return Ok(ExitCode::FAILURE);
    };
    if !(text_ok && veo_ok) {
        return Ok(ExitCode::FAILURE);
    }

    let store = open_store(&config)?;

    if *config.skip_scripts() {
        println!("SKIP_ROTEIRO_GENERATION=true, using existing scripts\n");
    } else {
        let scripts = run_scripts(&config, store.clone(), generator).await?;
        println!("\nScripts generated: {}", scripts.persisted().len());
        println!("{}\n", scripts.summary());
    }

    let videos = run_videos(&config, store, Arc::new(veo), cancel_on_ctrl_c()).await?;
    println!("\nVideos generated: {}", videos.summary().succeeded());
    println!("{}", videos.summary());
    Ok(ExitCode::SUCCESS)
}
