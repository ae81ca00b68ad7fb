//! Archive → dataset extraction driver.

use chess_core::{extract_row, split_games, RawGame};
use tracing::{debug, info};

use crate::archive::read_archive;
use crate::config::PipelineConfig;
use crate::error::DatasetError;
use crate::table::{write_dataset, Dataset};

/// Counts reported at the end of an extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Records that survived splitting and filtering.
    pub input_games: usize,
    /// Rows written to the table.
    pub rows: usize,
    /// Records dropped because a field could not be extracted.
    pub skipped: usize,
    pub table_bytes: usize,
}

impl ExtractionSummary {
    pub fn table_megabytes(&self) -> f64 {
        self.table_bytes as f64 / 1_000_000.0
    }
}

/// Extract one row per record, skipping (and counting) malformed records.
pub fn build_dataset(games: &[RawGame]) -> Dataset {
    let mut dataset = Dataset::default();

    for game in games {
        match extract_row(&game.text) {
            Ok(row) => dataset.rows.push(row),
            Err(e) => {
                debug!(ordinal = game.ordinal, error = %e, "Skipping malformed record");
                dataset.skipped += 1;
            }
        }
    }

    dataset
}

/// Split already-decoded archive text and extract the dataset.
///
/// The text is released as soon as the records are split off it.
pub fn dataset_from_text(text: String) -> (usize, Dataset) {
    let outcome = split_games(&text);
    drop(text);
    info!(
        candidates = outcome.candidates,
        retained = outcome.games.len(),
        dropped_eval = outcome.dropped_eval,
        dropped_no_moves = outcome.dropped_no_moves,
        "Archive split into games"
    );

    let input_games = outcome.games.len();
    let dataset = build_dataset(&outcome.games);
    (input_games, dataset)
}

/// Run the whole extraction: read archive, split, extract, write CSV.
pub fn run_extraction(config: &PipelineConfig) -> Result<ExtractionSummary, DatasetError> {
    let text = read_archive(&config.archive_path)?;
    let (input_games, dataset) = dataset_from_text(text);

    write_dataset(&config.dataset_path, &dataset)?;
    info!(path = %config.dataset_path.display(), rows = dataset.len(), "Dataset written");

    Ok(ExtractionSummary {
        input_games,
        rows: dataset.len(),
        skipped: dataset.skipped,
        table_bytes: dataset.approx_bytes(),
    })
}
