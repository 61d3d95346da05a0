//! Line-delimited JSON wire schema spoken with the assistant subprocess.

use std::collections::BTreeMap;

use assistant_session::{Block, CapabilityRegistry, ContentPart, StreamEvent, ToolResult};
use serde_json::{json, Value};

/// One decoded line from the child's stdout.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum WireEvent {
    /// Event surfaced to the session consumer.
    Stream(StreamEvent),
    /// Capability invocation request answered internally over stdin.
    CapabilityCall {
        id: String,
        server: String,
        action: String,
        input: Value,
    },
}

/// Decodes one stdout line, returning `None` for blanks and frames that are
/// not JSON objects with a `type` field. Unknown top-level kinds are kept as
/// [`StreamEvent::Unknown`] so the caller decides how to treat them.
pub(crate) fn decode_line(line: &str) -> Option<WireEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value = serde_json::from_str::<Value>(trimmed).ok()?;
    let kind = value.get("type")?.as_str()?;

    match kind {
        "assistant" => {
            let blocks = value
                .get("message")
                .and_then(|message| message.get("content"))
                .map(decode_blocks)
                .unwrap_or_default();
            Some(WireEvent::Stream(StreamEvent::Assistant { blocks }))
        }
        "result" => Some(WireEvent::Stream(StreamEvent::Result {
            is_error: value
                .get("is_error")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            session_id: value
                .get("session_id")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            total_cost_usd: value
                .get("total_cost_usd")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        })),
        "capability_call" => Some(WireEvent::CapabilityCall {
            id: value
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            server: value
                .get("server")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            action: value
                .get("action")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            input: value.get("input").cloned().unwrap_or_else(|| json!({})),
        }),
        other => Some(WireEvent::Stream(StreamEvent::Unknown {
            kind: other.to_string(),
        })),
    }
}

/// Maps assistant content items to blocks, dropping item kinds this wire
/// schema does not model.
fn decode_blocks(content: &Value) -> Vec<Block> {
    let Some(items) = content.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item.get("type").and_then(Value::as_str) {
            Some("text") => Some(Block::Text {
                text: item
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
            }),
            Some("tool_use") => Some(Block::ToolUse {
                name: item
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                input: item.get("input").cloned().unwrap_or_else(|| json!({})),
            }),
            _ => None,
        })
        .collect()
}

/// Renders the instruction submission line.
pub(crate) fn user_line(instruction: &str) -> String {
    json!({ "type": "user", "text": instruction }).to_string()
}

/// Renders the stdin reply for one capability call.
pub(crate) fn capability_result_line(id: &str, result: &ToolResult) -> String {
    let content: Vec<Value> = result
        .content
        .iter()
        .map(|part| match part {
            ContentPart::Text { text } => json!({ "type": "text", "text": text }),
        })
        .collect();

    json!({
        "type": "capability_result",
        "id": id,
        "is_error": result.is_error,
        "content": content,
    })
    .to_string()
}

/// Renders the capability manifest passed to the child at spawn: declared
/// action surfaces only, never handlers.
pub(crate) fn capability_manifest(servers: &BTreeMap<String, CapabilityRegistry>) -> String {
    let mut manifest = serde_json::Map::new();
    for (server_name, registry) in servers {
        let actions: Vec<Value> = registry
            .actions()
            .iter()
            .map(|action| {
                json!({
                    "name": action.name(),
                    "description": action.description(),
                    "input_schema": action.input_schema(),
                })
            })
            .collect();

        manifest.insert(
            server_name.clone(),
            json!({
                "name": registry.name(),
                "version": registry.version(),
                "actions": actions,
            }),
        );
    }

    Value::Object(manifest).to_string()
}
