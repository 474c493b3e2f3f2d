//! Header verification for root fragment candidates.

use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use super::HeaderCheck;

/// Compare the first four bytes of the file at `path` with `magic`.
///
/// Only root candidates are checked; numbered fragments are trusted by name.
///
/// # Errors
///
/// Returns any [`io::Error`] raised while opening or reading the file.
pub fn check_header(path: &Path, magic: [u8; 4]) -> io::Result<HeaderCheck> {
    let mut file = File::open(path)?;
    let mut found = [0_u8; 4];
    let mut filled = 0;
    while filled < found.len() {
        match file.read(&mut found[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(classify_header(&found[..filled], magic))
}

/// Classify an already-read header prefix against `magic`.
#[must_use]
pub fn classify_header(prefix: &[u8], magic: [u8; 4]) -> HeaderCheck {
    match <[u8; 4]>::try_from(prefix) {
        Ok(found) if found == magic => HeaderCheck::Valid,
        Ok(found) => HeaderCheck::Mismatch { found },
        Err(_) => HeaderCheck::TooShort { len: prefix.len() },
    }
}
