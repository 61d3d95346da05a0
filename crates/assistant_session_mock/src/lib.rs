//! Deterministic scripted implementation of the shared `assistant_session`
//! contract.
//!
//! This crate contains no transport logic and is intended for contract-level
//! integration testing: a fixed event script, recorded submissions, and
//! optional injected failures at the open or stream step.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use assistant_session::{
    AssistantSession, SessionBackend, SessionConfig, SessionError, StreamEvent,
};

/// Observable trace of one scripted backend's session activity.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    /// Number of sessions successfully opened.
    pub opened: usize,
    /// Instructions submitted, in order.
    pub submitted: Vec<String>,
    /// Number of sessions released (dropped), on any exit path.
    pub closed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Failure {
    Open(String),
    Stream(String),
}

/// Scripted backend replaying a fixed event sequence.
pub struct ScriptedBackend {
    events: Mutex<VecDeque<StreamEvent>>,
    failure: Option<Failure>,
    log: Arc<Mutex<SessionLog>>,
}

impl ScriptedBackend {
    /// Creates a backend whose session yields `events` then ends cleanly.
    #[must_use]
    pub fn new(events: Vec<StreamEvent>) -> Self {
        Self {
            events: Mutex::new(events.into()),
            failure: None,
            log: Arc::default(),
        }
    }

    /// Creates a backend whose `open` fails with `message`.
    #[must_use]
    pub fn failing_open(message: impl Into<String>) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            failure: Some(Failure::Open(message.into())),
            log: Arc::default(),
        }
    }

    /// Creates a backend whose session yields `events` and then fails the
    /// stream with `message` instead of ending.
    #[must_use]
    pub fn failing_stream(events: Vec<StreamEvent>, message: impl Into<String>) -> Self {
        Self {
            events: Mutex::new(events.into()),
            failure: Some(Failure::Stream(message.into())),
            log: Arc::default(),
        }
    }

    /// Shared handle for asserting on session activity after a run.
    #[must_use]
    pub fn log(&self) -> Arc<Mutex<SessionLog>> {
        Arc::clone(&self.log)
    }
}

impl SessionBackend for ScriptedBackend {
    fn open(&self, _config: SessionConfig) -> Result<Box<dyn AssistantSession>, SessionError> {
        if let Some(Failure::Open(message)) = &self.failure {
            return Err(SessionError::spawn(io::Error::other(message.clone())));
        }

        let events = std::mem::take(&mut *lock_unpoisoned(&self.events));
        lock_unpoisoned(&self.log).opened += 1;

        Ok(Box::new(ScriptedSession {
            events,
            stream_failure: match &self.failure {
                Some(Failure::Stream(message)) => Some(message.clone()),
                _ => None,
            },
            log: Arc::clone(&self.log),
        }))
    }
}

struct ScriptedSession {
    events: VecDeque<StreamEvent>,
    stream_failure: Option<String>,
    log: Arc<Mutex<SessionLog>>,
}

impl AssistantSession for ScriptedSession {
    fn submit(&mut self, instruction: &str) -> Result<(), SessionError> {
        lock_unpoisoned(&self.log)
            .submitted
            .push(instruction.to_string());
        Ok(())
    }

    fn next_event(&mut self) -> Result<Option<StreamEvent>, SessionError> {
        if let Some(event) = self.events.pop_front() {
            return Ok(Some(event));
        }

        match self.stream_failure.take() {
            Some(message) => Err(SessionError::stream(io::Error::other(message))),
            None => Ok(None),
        }
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        lock_unpoisoned(&self.log).closed += 1;
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use assistant_session::{Block, SessionBackend, SessionConfig, StreamEvent};

    use super::ScriptedBackend;

    fn config() -> SessionConfig {
        SessionConfig::new("mock-model", "/tmp")
    }

    #[test]
    fn scripted_session_replays_events_then_ends() {
        let events = vec![
            StreamEvent::Assistant {
                blocks: vec![Block::Text {
                    text: "first".to_string(),
                }],
            },
            StreamEvent::Result {
                is_error: false,
                session_id: "abc".to_string(),
                total_cost_usd: 0.1,
            },
        ];
        let backend = ScriptedBackend::new(events.clone());
        let log = backend.log();

        {
            let mut session = backend.open(config()).expect("open should succeed");
            session.submit("do it").expect("submit should succeed");
            assert_eq!(
                session.next_event().expect("event should arrive"),
                Some(events[0].clone())
            );
            assert_eq!(
                session.next_event().expect("event should arrive"),
                Some(events[1].clone())
            );
            assert_eq!(session.next_event().expect("stream should end"), None);
        }

        let log = log.lock().expect("log lock");
        assert_eq!(log.opened, 1);
        assert_eq!(log.submitted, vec!["do it".to_string()]);
        assert_eq!(log.closed, 1);
    }

    #[test]
    fn failing_open_never_opens_a_session() {
        let backend = ScriptedBackend::failing_open("connection refused");
        let log = backend.log();

        assert!(backend.open(config()).is_err());
        assert_eq!(log.lock().expect("log lock").opened, 0);
    }

    #[test]
    fn failing_stream_errors_after_the_scripted_events() {
        let backend = ScriptedBackend::failing_stream(
            vec![StreamEvent::Unknown {
                kind: "system".to_string(),
            }],
            "stream torn down",
        );
        let mut session = backend.open(config()).expect("open should succeed");

        assert!(session.next_event().expect("event should arrive").is_some());
        assert!(session.next_event().is_err());
    }
}
