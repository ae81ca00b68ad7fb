//! PGN field extraction: tag scanning anchored on tag names, plus movetext slicing.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::game_data::{ExtractedRow, GameResult, Ratings};
use crate::split::MOVE_NUMBER_MARKER;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).expect("valid tag regex"));

/// Tokens that open a game-termination marker ("1-0", "0-1", "1/2-1/2").
const RESULT_TOKENS: [&str; 3] = ["0-", "1-", "1/"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("missing [{0}] tag")]
    MissingTag(&'static str),

    #[error("no move list found")]
    MissingMoveList,

    #[error("move list has no result token")]
    MissingResultToken,

    #[error("cannot read mode from event '{0}'")]
    MissingMode(String),

    #[error("unrecognized result '{0}'")]
    UnrecognizedResult(String),

    #[error("invalid {tag} value '{value}'")]
    InvalidRating { tag: &'static str, value: String },
}

/// Borrowed view of one game record: its tag pairs and the movetext after them.
#[derive(Debug)]
pub struct GameRecord<'a> {
    tags: HashMap<&'a str, &'a str>,
    movetext: &'a str,
}

impl<'a> GameRecord<'a> {
    pub fn parse(text: &'a str) -> Self {
        let mut tags = HashMap::new();
        let mut movetext_start = 0;

        for cap in TAG_RE.captures_iter(text) {
            let (Some(whole), Some(key), Some(value)) = (cap.get(0), cap.get(1), cap.get(2))
            else {
                continue;
            };
            // First occurrence wins, like a forward scan would.
            tags.entry(key.as_str()).or_insert(value.as_str());
            movetext_start = whole.end();
        }

        Self {
            tags,
            movetext: &text[movetext_start..],
        }
    }

    /// Value of a tag, if present.
    pub fn tag(&self, name: &str) -> Option<&'a str> {
        self.tags.get(name).copied()
    }

    fn require(&self, name: &'static str) -> Result<&'a str, ExtractError> {
        self.tag(name).ok_or(ExtractError::MissingTag(name))
    }

    pub fn movetext(&self) -> &'a str {
        self.movetext
    }
}

/// Movetext from the first move number up to the result token, whitespace collapsed.
pub fn extract_move_list(record: &GameRecord<'_>) -> Result<String, ExtractError> {
    let movetext = record.movetext();
    let start = movetext
        .find(MOVE_NUMBER_MARKER)
        .ok_or(ExtractError::MissingMoveList)?;

    // The result scan begins just past the first "1. ".
    let scan_from = movetext.find("1. ").unwrap_or(start) + 2;
    let tail = &movetext[scan_from..];
    let end = RESULT_TOKENS
        .iter()
        .filter_map(|token| tail.find(token))
        .min()
        .map(|offset| scan_from + offset)
        .ok_or(ExtractError::MissingResultToken)?;

    let moves = movetext[start..end].split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(moves)
}

/// Time-control mode from the `Event` tag: "Rated Blitz game" -> "Blitz".
pub fn extract_mode(record: &GameRecord<'_>) -> Result<String, ExtractError> {
    let event = record.require("Event")?;
    event
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
        .ok_or_else(|| ExtractError::MissingMode(event.to_string()))
}

/// Result classification. `Unknown` is returned, not rejected, so callers decide.
pub fn extract_result(record: &GameRecord<'_>) -> Result<GameResult, ExtractError> {
    record.require("Result").map(GameResult::from_code)
}

pub fn extract_ratings(record: &GameRecord<'_>) -> Result<Ratings, ExtractError> {
    Ok(Ratings {
        white: parse_rating(record, "WhiteElo")?,
        black: parse_rating(record, "BlackElo")?,
    })
}

fn parse_rating(record: &GameRecord<'_>, tag: &'static str) -> Result<i32, ExtractError> {
    let value = record.require(tag)?;
    value.trim().parse().map_err(|_| ExtractError::InvalidRating {
        tag,
        value: value.to_string(),
    })
}

pub fn extract_termination(record: &GameRecord<'_>) -> Result<String, ExtractError> {
    record.require("Termination").map(str::to_string)
}

/// Extract all dataset fields from one raw game record.
///
/// Fails as a whole if any field is missing or malformed, so a row is never
/// built from a partial record.
pub fn extract_row(text: &str) -> Result<ExtractedRow, ExtractError> {
    let record = GameRecord::parse(text);

    let pgn = extract_move_list(&record)?;
    let mode = extract_mode(&record)?;
    let result = match extract_result(&record)? {
        GameResult::Unknown => {
            let code = record.tag("Result").unwrap_or_default();
            return Err(ExtractError::UnrecognizedResult(code.to_string()));
        }
        known => known,
    };
    let ratings = extract_ratings(&record)?;
    let termination = extract_termination(&record)?;

    Ok(ExtractedRow {
        pgn,
        mode,
        result,
        average_rating: ratings.average(),
        rating_difference: ratings.difference(),
        termination,
    })
}
