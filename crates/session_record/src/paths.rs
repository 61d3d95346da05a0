use std::path::{Path, PathBuf};

/// File name of the session-identifier record inside the application root.
pub const SESSION_ID_FILE: &str = ".assistant_session_id";

#[must_use]
pub fn session_id_path(root: &Path) -> PathBuf {
    root.join(SESSION_ID_FILE)
}
