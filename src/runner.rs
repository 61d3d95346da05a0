//! Lifecycle of one conversation: open under scoped acquisition, submit the
//! instruction exactly once, drain the stream to exhaustion.

use std::io::{self, Write};

use assistant_session::{SessionBackend, SessionConfig, SessionError};
use thiserror::Error;

use crate::emitter::EventEmitter;

/// Fatal run failures. There is no retry: a run either completes its stream
/// or aborts with one of these.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("failed to write output stream: {0}")]
    Output(#[from] io::Error),
}

/// Drives one session to completion, feeding every event to the emitter.
///
/// The session value lives inside this scope; its drop releases the
/// underlying resource on every exit path, including mid-stream failures.
pub fn run_session<W: Write>(
    backend: &dyn SessionBackend,
    config: SessionConfig,
    instruction: &str,
    emitter: &mut EventEmitter<W>,
) -> Result<(), RunError> {
    let mut session = backend.open(config)?;
    session.submit(instruction)?;

    while let Some(event) = session.next_event()? {
        emitter.handle(&event)?;
    }

    Ok(())
}
