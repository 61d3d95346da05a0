//! Durable session-identifier record.
//!
//! One plain-text file holds the most recent assistant session identifier so
//! a later, separate run can resume the same conversation. The file is
//! overwritten, never appended; this crate owns both directions of its
//! format.

mod error;
mod paths;
mod store;

pub use error::SessionRecordError;
pub use paths::{session_id_path, SESSION_ID_FILE};
pub use store::{load, save};
