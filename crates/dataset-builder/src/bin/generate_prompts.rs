//! Build fine-tuning prompts from the extracted dataset.
//!
//! Replays a row's move list, prints the move-by-move narration and the
//! analysis prompt for the final position.
//!
//! Usage: cargo run --release --bin generate-prompts -- [--row N] [--all]
//!
//! With `--all`, every row is emitted as one JSON line on stdout.

use std::env;
use std::io::{self, Write};

use dataset_builder::chess_core::{narrate, replay_moves, GameResult, PromptRecord};
use dataset_builder::config::PipelineConfig;
use dataset_builder::error::DatasetError;
use dataset_builder::table::{read_dataset, DatasetRecord};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Serialize)]
struct PromptLine {
    index: usize,
    result: &'static str,
    #[serde(flatten)]
    record: PromptRecord,
    prompt: String,
}

fn emit_all(records: &[DatasetRecord]) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0usize;

    for record in records {
        let result = record.game_result();
        if result == GameResult::Unknown {
            warn!(index = record.index, result = %record.result, "Unrecognized result label, row skipped");
            failed += 1;
            continue;
        }
        let prompt = match PromptRecord::prepare(record.average_rating, &record.pgn) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!(index = record.index, error = %e, "Move replay failed, row skipped");
                failed += 1;
                continue;
            }
        };
        let line = PromptLine {
            index: record.index,
            result: result.label(),
            prompt: prompt.render(),
            record: prompt,
        };
        serde_json::to_writer(&mut out, &line)?;
        writeln!(out)?;
    }

    out.flush()?;
    info!(rows = records.len(), failed, "Prompts emitted");
    Ok(())
}

fn show_row(records: &[DatasetRecord], row: usize) -> anyhow::Result<()> {
    let record = records.get(row).ok_or(DatasetError::RowOutOfRange {
        index: row,
        len: records.len(),
    })?;

    let game = replay_moves(&record.pgn)?;
    let prompt = PromptRecord {
        elo: record.average_rating,
        pgn: record.pgn.clone(),
        fen: game.fen(),
    };

    println!("{}", record.average_rating);
    println!("{}", narrate(&game.plies));
    println!("{}", record.game_result());
    println!();
    println!("{}", prompt.render());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let _ = dotenvy::dotenv();
    let config = PipelineConfig::from_env();

    let args: Vec<String> = env::args().collect();
    let mut row = config.prompt_row;
    let mut all = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--row" => {
                row = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(row);
                i += 2;
            }
            "--all" => {
                all = true;
                i += 1;
            }
            _ => i += 1,
        }
    }

    let records = read_dataset(&config.dataset_path)?;
    info!(path = %config.dataset_path.display(), rows = records.len(), "Dataset loaded");

    if all {
        emit_all(&records)
    } else {
        show_row(&records, row)
    }
}
