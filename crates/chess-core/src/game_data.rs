use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of a game as recorded in its `Result` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    Unknown,
}

impl GameResult {
    /// Classify a `Result` tag value by its first two characters
    /// ("1-0" -> white, "0-1" -> black, "1/2-1/2" -> draw).
    pub fn from_code(code: &str) -> Self {
        match code.get(..2) {
            Some("1-") => GameResult::WhiteWins,
            Some("0-") => GameResult::BlackWins,
            Some("1/") => GameResult::Draw,
            _ => GameResult::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "White Wins",
            GameResult::BlackWins => "Black Wins",
            GameResult::Draw => "Draw",
            GameResult::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameResult {
    type Err = std::convert::Infallible;

    /// Parse a dataset label back into a result. Unrecognized labels map to `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "White Wins" => GameResult::WhiteWins,
            "Black Wins" => GameResult::BlackWins,
            "Draw" => GameResult::Draw,
            _ => GameResult::Unknown,
        })
    }
}

/// Player ratings taken from the `WhiteElo` / `BlackElo` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratings {
    pub white: i32,
    pub black: i32,
}

impl Ratings {
    /// Mean of both ratings, rounded up.
    pub fn average(&self) -> i32 {
        let sum = self.white + self.black;
        sum.div_euclid(2) + sum.rem_euclid(2)
    }

    /// White minus black.
    pub fn difference(&self) -> i32 {
        self.white - self.black
    }
}

/// One dataset row extracted from a single game record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRow {
    pub pgn: String, // movetext, e.g. "1. e4 e5 2. Nf3 Nc6"
    pub mode: String,
    pub result: GameResult,
    pub average_rating: i32,
    pub rating_difference: i32,
    pub termination: String,
}
