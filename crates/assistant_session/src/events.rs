use serde_json::Value;

/// One content block inside an assistant event.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Free-form reasoning text.
    Text { text: String },
    /// Action invocation with its argument mapping.
    ToolUse { name: String, input: Value },
}

/// Typed event received from an open session, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Assistant output carrying an ordered block sequence.
    Assistant { blocks: Vec<Block> },
    /// Terminal status for the whole session.
    Result {
        is_error: bool,
        session_id: String,
        total_cost_usd: f64,
    },
    /// Wire kind this contract does not model; kept for forward
    /// compatibility so callers can decide to skip or report it.
    Unknown { kind: String },
}
