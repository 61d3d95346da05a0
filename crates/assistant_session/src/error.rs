use thiserror::Error;

/// Fatal session failures surfaced to the run boundary.
///
/// There is no retry and no partial-session recovery: a session either
/// completes its stream or the run aborts with one of these.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to spawn assistant process: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },

    #[error("assistant process did not expose a {stream} pipe")]
    Pipe { stream: &'static str },

    #[error("failed to write to assistant session: {source}")]
    Submit {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read assistant stream: {source}")]
    Stream {
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    #[must_use]
    pub fn spawn(source: std::io::Error) -> Self {
        Self::Spawn { source }
    }

    #[must_use]
    pub fn submit(source: std::io::Error) -> Self {
        Self::Submit { source }
    }

    #[must_use]
    pub fn stream(source: std::io::Error) -> Self {
        Self::Stream { source }
    }
}
