//! Natural-language prompt rendering for fine-tuning samples.

use serde::Serialize;

use crate::replay::{replay_moves, ReplayError};

/// Fill the analysis template. Each field is inserted exactly once, so a
/// move list carrying `{...}` comments is copied verbatim.
pub fn analysis_prompt(elo: i32, pgn: &str, fen: &str) -> String {
    format!(
        "As a seasoned chess tutor with an ELO rating of {elo}, \
         it's my job to provide a detailed breakdown of the current state of this chess game. \
         I'll carefully analyze the positions of the pieces, evaluate potential threats, \
         and identify any tactical opportunities. \
         My breakdown will offer valuable insights into the strategic aspects of the game, \
         helping both players understand the dynamics on the chessboard. \
         The current PGN is {pgn}. \
         The current FEN is {fen}. \
         Please don't give any advice on the next move. \
         Just evaluate the current state of the game and what observations you can make. \
         Be as objective as possible. If you think one player has an advantage, explain why. \
         If you cannot determine who has the advantage, explain why. \
         If you cannot make a decision, then don't make one."
    )
}

/// Inputs of one prompt: rating, move list and the position it leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRecord {
    pub elo: i32,
    pub pgn: String,
    pub fen: String,
}

impl PromptRecord {
    /// Replay `move_list` and capture the resulting position.
    pub fn prepare(elo: i32, move_list: &str) -> Result<Self, ReplayError> {
        let game = replay_moves(move_list)?;
        Ok(Self {
            elo,
            pgn: move_list.to_string(),
            fen: game.fen(),
        })
    }

    pub fn render(&self) -> String {
        analysis_prompt(self.elo, &self.pgn, &self.fen)
    }
}
