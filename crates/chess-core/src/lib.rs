//! Game record parsing, field extraction, move replay and prompt rendering
//! for the fine-tuning dataset pipeline. No I/O happens in this crate.

pub mod game_data;
pub mod pgn;
pub mod prompt;
pub mod replay;
pub mod split;

pub use game_data::{ExtractedRow, GameResult, Ratings};
pub use pgn::{extract_row, ExtractError, GameRecord};
pub use prompt::{analysis_prompt, PromptRecord};
pub use replay::{final_fen, narrate, replay_moves, PlyRecord, ReplayError, ReplayedGame};
pub use split::{split_games, RawGame, SplitOutcome};
