//! Preview-mode session orchestrator.
//!
//! One run drives one automated editing session against the external
//! assistant. Edits land on disk immediately; deploy stays disabled behind a
//! stub capability, and the user publishes manually after reviewing the live
//! preview.
//!
//! ## Inputs
//!
//! - `<root>/.user_prompt`: durable incremental-change prompt; preferred
//!   over the environment because it survives quoting of special characters.
//! - `USER_PROMPT`: fallback incremental-change prompt.
//! - `RESUME_SESSION_ID`: opaque handle for continuing a prior session.
//!
//! When neither prompt source yields content, the run is an initial build of
//! the target view.
//!
//! ## Output
//!
//! Stdout carries the whole protocol for the downstream live-preview
//! process: `[preview-agent]`-tagged diagnostic lines and `[live]` progress
//! lines for humans, interleaved with single-line JSON records
//! (`think` | `tool` | `result`) for strict consumers. The terminal `result`
//! record is always followed by the ready line; a fatal error exits non-zero
//! with neither, which downstream must treat as "preview not ready".

pub mod capabilities;
pub mod emitter;
pub mod options;
pub mod prompt;
pub mod runner;
