//! Reading the compressed game archive into memory.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::info;

use crate::error::DatasetError;

/// Read and decompress the whole archive as text.
///
/// `.bz2` files go through a multi-stream bzip2 decoder (Lichess dumps are
/// multi-stream); anything else is read as plain PGN. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn read_archive(path: &Path) -> Result<String, DatasetError> {
    let archive_err = |source: io::Error| DatasetError::Archive {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(archive_err)?;
    let is_bz2 = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("bz2"));

    let mut reader: Box<dyn Read> = if is_bz2 {
        Box::new(bzip2::read::MultiBzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(archive_err)?;
    info!(path = %path.display(), bytes = bytes.len(), "Archive decompressed");

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
