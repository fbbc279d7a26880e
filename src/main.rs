// Headless driver for the compressor: one file in, `compressed-image.<ext>` out.
// The library in lib.rs is what a UI shell links against.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use image_compressor_lib::utils::mime_from_extension;
use image_compressor_lib::{AppState, FileInput, QualityTier, download_compressed, select_image};

/// Compress one image without letting it grow
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Image to compress
    input: PathBuf,

    /// Quality tier: high, medium or low
    #[arg(long, default_value_t = QualityTier::Medium)]
    tier: QualityTier,

    /// Directory for compressed-image.<ext>
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)
        .with_writer(std::io::stderr) // stdout carries the JSON view
        .compact()
        .init();

    info!("=== Compressor Starting ===");
    let args = Args::parse();

    let name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime_type = mime_from_extension(&name).unwrap_or("application/octet-stream");
    let bytes = tokio::fs::read(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let state = AppState::new();
    state.set_tier(args.tier).await;

    let view = select_image(
        &state,
        FileInput {
            name,
            mime_type: mime_type.to_string(),
            bytes,
        },
    )
    .await?;
    println!("{}", serde_json::to_string_pretty(&view)?);

    let download = download_compressed(&state).await?;
    let output = args.out_dir.join(&download.file_name);
    tokio::fs::create_dir_all(&args.out_dir).await?;
    tokio::fs::write(&output, &download.bytes)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Wrote {} ({} bytes)", output.display(), download.bytes.len());
    Ok(())
}
