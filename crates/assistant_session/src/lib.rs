//! Backend-agnostic contract for one assistant editing session.
//!
//! This crate intentionally defines only the shared session lifecycle,
//! capability-dispatch, and stream-event contract types. It excludes
//! transport details, wire payloads, and multi-session orchestration
//! concerns.

mod capability;
mod config;
mod error;
mod events;

pub use capability::{ActionDefinition, ActionHandler, CapabilityRegistry, ContentPart, ToolResult};
pub use config::SessionConfig;
pub use error::SessionError;
pub use events::{Block, StreamEvent};

/// One open conversation with the external assistant.
///
/// Implementations own whatever connection or process backs the session and
/// must release it when the value is dropped, so a caller holding the session
/// in a scope gets guaranteed teardown on every exit path.
pub trait AssistantSession {
    /// Submits the run instruction. Called exactly once per session.
    fn submit(&mut self, instruction: &str) -> Result<(), SessionError>;

    /// Blocks until the next stream event arrives.
    ///
    /// Returns `Ok(None)` when the stream is exhausted. This is the only
    /// suspension point in the orchestration core.
    fn next_event(&mut self) -> Result<Option<StreamEvent>, SessionError>;
}

/// Factory seam for opening sessions against a concrete backend.
pub trait SessionBackend {
    /// Opens a session configured by `config`, consuming the configuration.
    ///
    /// The configuration (capability registries included) is owned solely by
    /// the returned session for its whole lifetime.
    fn open(&self, config: SessionConfig) -> Result<Box<dyn AssistantSession>, SessionError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        AssistantSession, Block, SessionBackend, SessionConfig, SessionError, StreamEvent,
    };

    struct SingleEventSession {
        submitted: Option<String>,
        drained: bool,
    }

    impl AssistantSession for SingleEventSession {
        fn submit(&mut self, instruction: &str) -> Result<(), SessionError> {
            self.submitted = Some(instruction.to_string());
            Ok(())
        }

        fn next_event(&mut self) -> Result<Option<StreamEvent>, SessionError> {
            if self.drained {
                return Ok(None);
            }

            self.drained = true;
            Ok(Some(StreamEvent::Assistant {
                blocks: vec![Block::Text {
                    text: "done".to_string(),
                }],
            }))
        }
    }

    struct SingleEventBackend;

    impl SessionBackend for SingleEventBackend {
        fn open(&self, _config: SessionConfig) -> Result<Box<dyn AssistantSession>, SessionError> {
            Ok(Box::new(SingleEventSession {
                submitted: None,
                drained: false,
            }))
        }
    }

    #[test]
    fn backend_sessions_drive_submit_then_drain() {
        let backend = SingleEventBackend;
        let config = SessionConfig::new("contract-model", "/tmp");
        let mut session = backend.open(config).expect("open should succeed");

        session
            .submit("make the header blue")
            .expect("submit should succeed");

        let first = session.next_event().expect("stream should yield");
        assert_eq!(
            first,
            Some(StreamEvent::Assistant {
                blocks: vec![Block::Text {
                    text: "done".to_string(),
                }],
            })
        );
        assert_eq!(session.next_event().expect("stream should end"), None);
    }

    #[test]
    fn tool_use_blocks_carry_argument_values() {
        let block = Block::ToolUse {
            name: "Write".to_string(),
            input: json!({ "file_path": "src/pages/Dashboard.tsx" }),
        };

        match block {
            Block::ToolUse { name, input } => {
                assert_eq!(name, "Write");
                assert_eq!(input["file_path"], "src/pages/Dashboard.tsx");
            }
            Block::Text { .. } => panic!("expected a tool-use block"),
        }
    }
}
