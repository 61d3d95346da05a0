use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::SessionRecordError;
use crate::paths::session_id_path;

/// Overwrites the record under `root` with `session_id`.
///
/// Prior contents are irrelevant; the final file holds exactly the given
/// identifier string.
pub fn save(root: &Path, session_id: &str) -> Result<(), SessionRecordError> {
    let path = session_id_path(root);
    fs::write(&path, session_id)
        .map_err(|source| SessionRecordError::io("writing session record", path, source))
}

/// Reads the recorded identifier under `root`.
///
/// A missing file or whitespace-only contents mean "no record" rather than
/// an error.
pub fn load(root: &Path) -> Result<Option<String>, SessionRecordError> {
    let path = session_id_path(root);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SessionRecordError::io("reading session record", path, source));
        }
    };

    let trimmed = contents.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
