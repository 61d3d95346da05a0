//! Subprocess-backed implementation of the shared `assistant_session`
//! contract.
//!
//! The assistant runtime is treated as a black box: one child process that
//! accepts the session configuration as flags plus a JSON capability
//! manifest, reads the instruction and capability replies as line-delimited
//! JSON on stdin, and emits its message stream as line-delimited JSON on
//! stdout. Child teardown is guaranteed by `Drop` on the session value:
//! kill, bounded wait, then reap.

mod config;
mod session;
mod wire;

pub use config::{ProcessBackendConfig, DEFAULT_ASSISTANT_PROGRAM};
pub use session::ProcessSessionBackend;
