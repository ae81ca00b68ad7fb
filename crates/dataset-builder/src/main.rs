//! Game extraction
//!
//! Decompresses a Lichess PGN archive, keeps games without engine
//! evaluations, and writes one CSV row per game.
//!
//! Usage: cargo run --release --bin extract-games
//! (paths come from ARCHIVE_PATH / DATASET_PATH, see config.rs)

use dataset_builder::config::PipelineConfig;
use dataset_builder::pipeline::run_extraction;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let config = PipelineConfig::from_env();
    info!(
        archive = %config.archive_path.display(),
        dataset = %config.dataset_path.display(),
        "Extraction config loaded"
    );

    let summary = run_extraction(&config)?;

    println!("Dataset is {:.2} MB", summary.table_megabytes());
    println!(
        "Games after filtering: {}\nDataset rows: {}",
        summary.input_games, summary.rows
    );
    if summary.skipped > 0 {
        println!("Skipped malformed records: {}", summary.skipped);
    }

    Ok(())
}
