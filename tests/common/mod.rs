use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a unique suffix based on timestamp to avoid collisions between tests.
pub fn unique_suffix() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", std::process::id(), ts % 1_000_000_000)
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chess-finetune-{name}-{}", unique_suffix()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write `text` as a bzip2-compressed archive.
pub fn write_bz2(path: &Path, text: &str) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = bzip2::write::BzEncoder::new(file, bzip2::Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

/// A Lichess-style game record.
pub fn lichess_game(
    white_elo: &str,
    black_elo: &str,
    result: &str,
    termination: &str,
    movetext: &str,
) -> String {
    format!(
        r#"[Event "Rated Blitz game"]
[Site "https://lichess.org/abcdefgh"]
[White "alice"]
[Black "bob"]
[Result "{result}"]
[UTCDate "2014.10.01"]
[UTCTime "00:00:06"]
[WhiteElo "{white_elo}"]
[BlackElo "{black_elo}"]
[WhiteRatingDiff "+9"]
[BlackRatingDiff "-9"]
[ECO "C44"]
[Opening "King's Knight Opening: Normal Variation"]
[TimeControl "300+0"]
[Termination "{termination}"]

{movetext} {result}

"#
    )
}
