//! Event classification and the stdout line protocol.
//!
//! Every received block becomes exactly one structured record, written in
//! arrival order with no buffering beyond the current event. Plain tagged
//! lines are interleaved for humans; strict consumers parse only the JSON
//! records and skip everything else.

use std::io::{self, Write};
use std::path::PathBuf;

use assistant_session::{Block, StreamEvent};
use serde::Serialize;
use serde_json::Value;

/// Tag prefixing plain diagnostic lines.
pub const DIAG_TAG: &str = "[preview-agent]";

/// Tag prefixing file-mutation progress lines.
pub const LIVE_TAG: &str = "[live]";

/// Final line of a completed run: the preview can start now.
pub const READY_LINE: &str = "[preview-agent] changes complete - starting preview";

/// Actions whose invocation mutates files, warranting a progress line.
const FILE_MUTATING_ACTIONS: [&str; 2] = ["Write", "Edit"];

/// Argument keys checked, in order, for the target file path.
const PATH_ARGUMENT_KEYS: [&str; 2] = ["file_path", "path"];

const UNKNOWN_PATH: &str = "unknown";

/// Terminal status of the run as reported downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    Error,
}

/// One structured output record; the `type` field is the discriminator the
/// downstream consumer dispatches on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamRecord {
    Think {
        content: String,
    },
    Tool {
        tool: String,
        input: String,
    },
    Result {
        status: RunStatus,
        cost: f64,
        session_id: String,
    },
}

/// Writes a diagnostic line to the process stdout.
///
/// Used for narration before the emitter owns the stream; the emitter writes
/// its own lines so tests can capture them.
pub fn diag(message: impl std::fmt::Display) {
    println!("{DIAG_TAG} {message}");
}

/// Classifies stream events into the line protocol and persists the session
/// identifier on the terminal event.
pub struct EventEmitter<W: Write> {
    out: W,
    record_root: PathBuf,
}

impl<W: Write> EventEmitter<W> {
    /// Creates an emitter writing to `out`; `record_root` is the directory
    /// holding the session-identifier record.
    pub fn new(out: W, record_root: impl Into<PathBuf>) -> Self {
        Self {
            out,
            record_root: record_root.into(),
        }
    }

    /// Handles one stream event in arrival order.
    pub fn handle(&mut self, event: &StreamEvent) -> io::Result<()> {
        match event {
            StreamEvent::Assistant { blocks } => {
                for block in blocks {
                    self.emit_block(block)?;
                }
                Ok(())
            }
            StreamEvent::Result {
                is_error,
                session_id,
                total_cost_usd,
            } => self.finish(*is_error, session_id, *total_cost_usd),
            StreamEvent::Unknown { kind } => {
                self.diag_line(format_args!("skipping unrecognized event kind '{kind}'"))
            }
        }
    }

    fn emit_block(&mut self, block: &Block) -> io::Result<()> {
        match block {
            Block::Text { text } => self.record(&StreamRecord::Think {
                content: text.clone(),
            }),
            Block::ToolUse { name, input } => {
                if FILE_MUTATING_ACTIONS.contains(&name.as_str()) {
                    let path = target_path(input);
                    self.line(format_args!("{LIVE_TAG} {name}: {path}"))?;
                }

                self.record(&StreamRecord::Tool {
                    tool: name.clone(),
                    input: input.to_string(),
                })
            }
        }
    }

    /// Terminal-event sequence: status, record-file side effect, `result`
    /// record, then the ready signal, in that order, exactly once per run.
    fn finish(&mut self, is_error: bool, session_id: &str, cost: f64) -> io::Result<()> {
        let status = if is_error {
            RunStatus::Error
        } else {
            RunStatus::Success
        };

        if !session_id.is_empty() {
            self.diag_line(format_args!("session id: {session_id}"))?;
            match session_record::save(&self.record_root, session_id) {
                Ok(()) => self.diag_line(format_args!("session id saved"))?,
                // Record failures are logged, never fatal.
                Err(error) => {
                    self.diag_line(format_args!("failed to save session record: {error}"))?;
                }
            }
        }

        self.record(&StreamRecord::Result {
            status,
            cost,
            session_id: session_id.to_string(),
        })?;
        self.line(format_args!("{READY_LINE}"))
    }

    fn record(&mut self, record: &StreamRecord) -> io::Result<()> {
        let encoded = serde_json::to_string(record).map_err(io::Error::other)?;
        self.line(format_args!("{encoded}"))
    }

    fn diag_line(&mut self, message: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.line(format_args!("{DIAG_TAG} {message}"))
    }

    fn line(&mut self, line: std::fmt::Arguments<'_>) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}

/// Looks up the mutated file path from the argument mapping, preferring
/// `file_path` over `path`.
fn target_path(input: &Value) -> &str {
    PATH_ARGUMENT_KEYS
        .iter()
        .find_map(|key| input.get(key).and_then(Value::as_str))
        .unwrap_or(UNKNOWN_PATH)
}
