//! Replaying a stored move list on a board to recover the final position.

use std::io;
use std::ops::ControlFlow;
use std::sync::LazyLock;

use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use regex::Regex;
use shakmaty::{
    fen::Fen, uci::UciMove, CastlingMode, Chess, Color, EnPassantMode, Position, Square,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("illegal move {san} at ply {ply}: {reason}")]
    IllegalMove {
        ply: usize,
        san: String,
        reason: String,
    },

    #[error("move list could not be read: {0}")]
    Io(#[from] io::Error),
}

/// A single applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyRecord {
    /// 1-based half-move count.
    pub ply: usize,
    pub color: Color,
    pub from: Option<Square>,
    pub to: Square,
    pub san: String,
}

impl PlyRecord {
    /// Full-move number this ply belongs to.
    pub fn move_number(&self) -> usize {
        self.ply.div_ceil(2)
    }
}

/// Board after the whole move list was applied.
#[derive(Debug, Clone)]
pub struct ReplayedGame {
    pub position: Chess,
    pub plies: Vec<PlyRecord>,
}

impl ReplayedGame {
    pub fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }
}

struct MovetextState {
    pos: Chess,
    plies: Vec<PlyRecord>,
}

/// Visitor that plays mainline SAN moves from the standard start position.
struct Replayer;

impl Visitor for Replayer {
    type Tags = ();
    type Movetext = MovetextState;
    type Output = Result<ReplayedGame, ReplayError>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, ()> {
        ControlFlow::Continue(())
    }

    fn tag(&mut self, _tags: &mut (), _name: &[u8], _value: RawTag<'_>) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _tags: ()) -> ControlFlow<Self::Output, MovetextState> {
        ControlFlow::Continue(MovetextState {
            pos: Chess::default(),
            plies: Vec::new(),
        })
    }

    fn san(&mut self, state: &mut MovetextState, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        let ply = state.plies.len() + 1;
        let san = san_plus.san.to_string();

        let mv = match san_plus.san.to_move(&state.pos) {
            Ok(mv) => mv,
            Err(e) => {
                return ControlFlow::Break(Err(ReplayError::IllegalMove {
                    ply,
                    san,
                    reason: e.to_string(),
                }))
            }
        };

        let color = state.pos.turn();
        let (from, to) = match mv.to_uci(CastlingMode::Standard) {
            UciMove::Normal { from, to, .. } => (Some(from), to),
            UciMove::Put { to, .. } => (None, to),
            UciMove::Null => (None, mv.to()),
        };

        state.pos = match state.pos.clone().play(mv) {
            Ok(next) => next,
            Err(_) => {
                return ControlFlow::Break(Err(ReplayError::IllegalMove {
                    ply,
                    san,
                    reason: "rejected by position".to_string(),
                }))
            }
        };

        state.plies.push(PlyRecord {
            ply,
            color,
            from,
            to,
            san,
        });
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _state: &mut MovetextState) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true)) // mainline only
    }

    fn end_game(&mut self, state: MovetextState) -> Self::Output {
        Ok(ReplayedGame {
            position: state.pos,
            plies: state.plies,
        })
    }
}

static MOVE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.+").expect("valid move number regex"));

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Whitespace-separated mainline tokens, with `{...}` comments and
/// `(...)` variations removed.
fn mainline_tokens(move_list: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_comment = false;
    let mut depth = 0usize;

    for (i, c) in move_list.char_indices() {
        match c {
            '{' if !in_comment => {
                flush(move_list, i, &mut start, &mut tokens);
                in_comment = true;
            }
            '}' if in_comment => in_comment = false,
            '(' if !in_comment => {
                flush(move_list, i, &mut start, &mut tokens);
                depth += 1;
            }
            ')' if !in_comment && depth > 0 => depth -= 1,
            c if c.is_whitespace() => flush(move_list, i, &mut start, &mut tokens),
            _ if !in_comment && depth == 0 && start.is_none() => start = Some(i),
            _ => {}
        }
    }
    flush(move_list, move_list.len(), &mut start, &mut tokens);

    tokens
}

fn flush<'a>(text: &'a str, end: usize, start: &mut Option<usize>, tokens: &mut Vec<&'a str>) {
    if let Some(s) = start.take() {
        tokens.push(&text[s..end]);
    }
}

/// SAN moves of the mainline in order, rejecting the first token that is
/// neither a move number, NAG, result nor parsable SAN.
fn mainline_sans(move_list: &str) -> Result<Vec<String>, ReplayError> {
    let mut sans = Vec::new();

    for token in mainline_tokens(move_list) {
        let rest = match MOVE_NUMBER_RE.find(token) {
            Some(m) => &token[m.end()..],
            None => token,
        };
        if rest.is_empty() || rest.starts_with('$') || RESULT_TOKENS.contains(&rest) {
            continue;
        }

        let san = rest.trim_end_matches(['!', '?']);
        if let Err(e) = san.parse::<SanPlus>() {
            return Err(ReplayError::IllegalMove {
                ply: sans.len() + 1,
                san: san.to_string(),
                reason: e.to_string(),
            });
        }
        sans.push(san.to_string());
    }

    Ok(sans)
}

/// Apply every move of `move_list` (e.g. "1. e4 e5 2. Nf3") to a fresh board.
///
/// Stops at the first move that cannot be parsed or that the rules reject;
/// no partial board is returned.
pub fn replay_moves(move_list: &str) -> Result<ReplayedGame, ReplayError> {
    let sans = mainline_sans(move_list)?;

    let mut reader = Reader::new(move_list.as_bytes());
    let game = match reader.read_game(&mut Replayer)? {
        Some(result) => result?,
        None => ReplayedGame {
            position: Chess::default(),
            plies: Vec::new(),
        },
    };

    // The reader silently passes over tokens it cannot tokenize.
    if game.plies.len() != sans.len() {
        let ply = game.plies.len() + 1;
        return Err(ReplayError::IllegalMove {
            ply,
            san: sans.get(ply - 1).cloned().unwrap_or_default(),
            reason: "move was not applied".to_string(),
        });
    }

    Ok(game)
}

/// Final FEN after replaying `move_list`.
pub fn final_fen(move_list: &str) -> Result<String, ReplayError> {
    replay_moves(move_list).map(|game| game.fen())
}

/// One line per ply, e.g. "Move 1 White: e2 to e4".
pub fn narrate(plies: &[PlyRecord]) -> String {
    plies
        .iter()
        .map(|p| {
            let side = match p.color {
                Color::White => "White",
                Color::Black => "Black",
            };
            let from = p.from.map(|sq| sq.to_string()).unwrap_or_else(|| "-".to_string());
            format!("Move {} {}: {} to {}", p.move_number(), side, from, p.to)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_four_moves() {
        let game = replay_moves("1. e4 e5 2. Nf3 Nc6").unwrap();
        assert_eq!(game.plies.len(), 4);
        assert_eq!(
            game.fen(),
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
        );
    }

    #[test]
    fn test_replay_is_repeatable() {
        let moves = "1. d4 d5 2. c4 e6 3. Nc3 Nf6 4. Bg5 Be7";
        assert_eq!(final_fen(moves).unwrap(), final_fen(moves).unwrap());
    }

    #[test]
    fn test_empty_move_list_is_start_position() {
        assert_eq!(
            final_fen("").unwrap(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[test]
    fn test_unparsable_moves_fail_the_whole_list() {
        let err = replay_moves("1. e4 e5 2. Zz9 Zz8 3. Nf3 Nc6").unwrap_err();
        match err {
            ReplayError::IllegalMove { ply, san, .. } => {
                assert_eq!(ply, 3);
                assert_eq!(san, "Zz9");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparsable_move_is_blamed_not_its_successor() {
        let err = replay_moves("1. e4 e5 2. Zz9 Nc6").unwrap_err();
        assert!(matches!(err, ReplayError::IllegalMove { ref san, .. } if san == "Zz9"));
    }

    #[test]
    fn test_comments_nags_and_annotations_are_not_moves() {
        let game = replay_moves("1. e4! { best by test } e5 $1 2. Nf3 (2. f4 exf4) Nc6?! 1-0").unwrap();
        assert_eq!(game.plies.len(), 4);
        assert_eq!(
            game.fen(),
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3"
        );
    }

    #[test]
    fn test_black_move_numbers_are_skipped() {
        let tokens = mainline_sans("1. e4 1... e5 2.Nf3").unwrap();
        assert_eq!(tokens, vec!["e4", "e5", "Nf3"]);
    }

    #[test]
    fn test_illegal_move_is_reported() {
        let err = replay_moves("1. e4 e5 2. Ke3").unwrap_err();
        match err {
            ReplayError::IllegalMove { ply, san, .. } => {
                assert_eq!(ply, 3);
                assert_eq!(san, "Ke3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_narration() {
        let game = replay_moves("1. e4 e5 2. Nf3").unwrap();
        assert_eq!(
            narrate(&game.plies),
            "Move 1 White: e2 to e4\nMove 1 Black: e7 to e5\nMove 2 White: g1 to f3"
        );
    }

    #[test]
    fn test_castling_narrates_king_squares() {
        let game = replay_moves("1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. O-O").unwrap();
        let last = game.plies.last().unwrap();
        assert_eq!(last.from, Some(Square::E1));
        assert_eq!(last.to, Square::G1);
        assert_eq!(last.move_number(), 4);
    }

    #[test]
    fn test_en_passant_square_only_when_capturable() {
        // After 1. e4 no black pawn can capture on e3.
        assert_eq!(
            final_fen("1. e4").unwrap(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }
}
