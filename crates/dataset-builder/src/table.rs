//! The dataset table and its CSV representation.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::mem::size_of;
use std::path::Path;

use chess_core::{ExtractedRow, GameResult};
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// Extracted rows in archive order, plus how many records were skipped.
#[derive(Debug, Default)]
pub struct Dataset {
    pub rows: Vec<ExtractedRow>,
    pub skipped: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Approximate in-memory footprint: string payloads plus fixed-width columns.
    pub fn approx_bytes(&self) -> usize {
        self.rows
            .iter()
            .map(|row| {
                size_of::<usize>()
                    + row.pgn.len()
                    + row.mode.len()
                    + row.result.label().len()
                    + 2 * size_of::<i32>()
                    + row.termination.len()
            })
            .sum()
    }
}

/// One CSV line. The index column has an empty header, as dataframe exports do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    #[serde(rename = "")]
    pub index: usize,
    #[serde(rename = "PGN")]
    pub pgn: String,
    #[serde(rename = "Mode")]
    pub mode: String,
    #[serde(rename = "Result")]
    pub result: String,
    #[serde(rename = "Average Rating")]
    pub average_rating: i32,
    #[serde(rename = "Rating Difference")]
    pub rating_difference: i32,
    #[serde(rename = "Termination Type")]
    pub termination: String,
}

impl DatasetRecord {
    pub fn from_row(index: usize, row: &ExtractedRow) -> Self {
        Self {
            index,
            pgn: row.pgn.clone(),
            mode: row.mode.clone(),
            result: row.result.label().to_string(),
            average_rating: row.average_rating,
            rating_difference: row.rating_difference,
            termination: row.termination.clone(),
        }
    }

    pub fn game_result(&self) -> GameResult {
        self.result.parse().unwrap_or(GameResult::Unknown)
    }
}

pub fn write_records<W: Write>(writer: W, dataset: &Dataset) -> Result<(), DatasetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (index, row) in dataset.rows.iter().enumerate() {
        csv_writer.serialize(DatasetRecord::from_row(index, row))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the dataset to `path`, creating parent directories as needed.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    write_records(file, dataset)
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<DatasetRecord>, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for record in csv_reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

pub fn read_dataset(path: &Path) -> Result<Vec<DatasetRecord>, DatasetError> {
    let file = File::open(path)?;
    read_records(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> Dataset {
        Dataset {
            rows: vec![
                ExtractedRow {
                    pgn: "1. e4 e5 2. Nf3 Nc6".to_string(),
                    mode: "Blitz".to_string(),
                    result: GameResult::WhiteWins,
                    average_rating: 1500,
                    rating_difference: -200,
                    termination: "Normal".to_string(),
                },
                ExtractedRow {
                    pgn: "1. d4 d5".to_string(),
                    mode: "Bullet".to_string(),
                    result: GameResult::Draw,
                    average_rating: 1801,
                    rating_difference: 3,
                    termination: "Time forfeit".to_string(),
                },
            ],
            skipped: 1,
        }
    }

    #[test]
    fn test_csv_header_and_rows() {
        let mut out = Vec::new();
        write_records(&mut out, &sample_dataset()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            ",PGN,Mode,Result,Average Rating,Rating Difference,Termination Type"
        );
        assert_eq!(lines[1], "0,1. e4 e5 2. Nf3 Nc6,Blitz,White Wins,1500,-200,Normal");
        assert_eq!(lines[2], "1,1. d4 d5,Bullet,Draw,1801,3,Time forfeit");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_read_back_by_header_names() {
        let mut out = Vec::new();
        write_records(&mut out, &sample_dataset()).unwrap();
        let records = read_records(out.as_slice()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pgn, "1. e4 e5 2. Nf3 Nc6");
        assert_eq!(records[0].game_result(), GameResult::WhiteWins);
        assert_eq!(records[1].index, 1);
        assert_eq!(records[1].average_rating, 1801);
    }

    #[test]
    fn test_unrecognized_result_label_reads_as_unknown() {
        let csv = ",PGN,Mode,Result,Average Rating,Rating Difference,Termination Type\n\
                   0,1. e4,Blitz,Abandoned,1500,0,Normal\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].game_result(), GameResult::Unknown);
    }

    #[test]
    fn test_approx_bytes_counts_payload() {
        let dataset = sample_dataset();
        let expected_strings = "1. e4 e5 2. Nf3 Nc6".len()
            + "Blitz".len()
            + "White Wins".len()
            + "Normal".len()
            + "1. d4 d5".len()
            + "Bullet".len()
            + "Draw".len()
            + "Time forfeit".len();
        let fixed = 2 * (size_of::<usize>() + 2 * size_of::<i32>());
        assert_eq!(dataset.approx_bytes(), expected_strings + fixed);
    }
}
