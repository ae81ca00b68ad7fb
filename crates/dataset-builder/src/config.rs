//! Pipeline configuration from environment variables

use std::env;
use std::path::PathBuf;

pub const DEFAULT_ARCHIVE_PATH: &str = "finetuning/archive/lichess_db_standard_rated_2014-10.pgn.bz2";
pub const DEFAULT_DATASET_PATH: &str = "finetuning/data/chess_games.csv";

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Compressed PGN archive to read
    pub archive_path: PathBuf,

    /// CSV table written by extraction and read by prompt generation
    pub dataset_path: PathBuf,

    /// Row shown by the prompt generator when no `--row` is given
    pub prompt_row: usize,
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        Self {
            archive_path: env::var("ARCHIVE_PATH")
                .unwrap_or_else(|_| DEFAULT_ARCHIVE_PATH.to_string())
                .into(),
            dataset_path: env::var("DATASET_PATH")
                .unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string())
                .into(),
            prompt_row: env::var("PROMPT_ROW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            archive_path: DEFAULT_ARCHIVE_PATH.into(),
            dataset_path: DEFAULT_DATASET_PATH.into(),
            prompt_row: 0,
        }
    }
}
