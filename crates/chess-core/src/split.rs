//! Splitting a decompressed archive into individual game records.

/// Literal that opens every game's tag section.
pub const GAME_DELIMITER: &str = "[Event";

/// Games carrying engine evaluations (`[%eval ...]` comments) are excluded.
pub const EVAL_MARKER: &str = "eval";

/// Every usable game has at least a first move number.
pub const MOVE_NUMBER_MARKER: &str = "1.";

/// One game record as found in the archive, delimiter included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGame {
    /// Position among all candidate segments (0-based).
    pub ordinal: usize,
    pub text: String,
}

/// Retained records plus bookkeeping about what was dropped.
#[derive(Debug, Default)]
pub struct SplitOutcome {
    pub games: Vec<RawGame>,
    pub candidates: usize,
    pub dropped_eval: usize,
    pub dropped_no_moves: usize,
}

impl SplitOutcome {
    pub fn discarded(&self) -> usize {
        self.dropped_eval + self.dropped_no_moves
    }
}

/// Split archive text on the game delimiter and keep only records without
/// evaluation annotations that contain a move list.
///
/// The segment before the first delimiter is not a game and is ignored.
pub fn split_games(text: &str) -> SplitOutcome {
    let mut outcome = SplitOutcome::default();

    for (ordinal, segment) in text.split(GAME_DELIMITER).skip(1).enumerate() {
        outcome.candidates += 1;

        if segment.contains(EVAL_MARKER) {
            outcome.dropped_eval += 1;
            continue;
        }
        if !segment.contains(MOVE_NUMBER_MARKER) {
            outcome.dropped_no_moves += 1;
            continue;
        }

        let mut text = String::with_capacity(GAME_DELIMITER.len() + segment.len());
        text.push_str(GAME_DELIMITER);
        text.push_str(segment);
        outcome.games.push(RawGame { ordinal, text });
    }

    outcome
}
