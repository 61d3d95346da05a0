use std::fmt;

use serde_json::Value;

/// Handler invoked when the assistant calls a registered action.
pub type ActionHandler = Box<dyn Fn(&Value) -> ToolResult + Send + Sync>;

/// One typed content part inside a tool result.
///
/// Only text parts exist today; the enum keeps the wire shape open for
/// richer part kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text { text: String },
}

/// Result returned to the assistant for one action invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub is_error: bool,
    pub content: Vec<ContentPart>,
}

impl ToolResult {
    /// Constructs a successful result with a single text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            is_error: false,
            content: vec![ContentPart::Text { text: text.into() }],
        }
    }

    /// Constructs an error result with a single text part.
    #[must_use]
    pub fn error_text(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            content: vec![ContentPart::Text { text: text.into() }],
        }
    }
}

/// Externally invokable action offered to the assistant.
pub struct ActionDefinition {
    name: String,
    description: String,
    input_schema: Value,
    handler: ActionHandler,
}

impl ActionDefinition {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
        handler: impl Fn(&Value) -> ToolResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            handler: Box::new(handler),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn input_schema(&self) -> &Value {
        &self.input_schema
    }

    /// Runs the handler against the provided arguments.
    #[must_use]
    pub fn invoke(&self, input: &Value) -> ToolResult {
        (self.handler)(input)
    }
}

impl fmt::Debug for ActionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish_non_exhaustive()
    }
}

/// Named, versioned collection of actions exposed to the assistant.
///
/// Registries are immutable after construction. Dispatch is a lookup keyed
/// by action name, so enabled/disabled policy is data, not call-site
/// branching.
#[derive(Debug)]
pub struct CapabilityRegistry {
    name: String,
    version: String,
    actions: Vec<ActionDefinition>,
}

impl CapabilityRegistry {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_action(mut self, action: ActionDefinition) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn actions(&self) -> &[ActionDefinition] {
        &self.actions
    }

    #[must_use]
    pub fn action(&self, name: &str) -> Option<&ActionDefinition> {
        self.actions.iter().find(|action| action.name() == name)
    }

    /// Dispatches one invocation, returning `None` for unregistered names.
    #[must_use]
    pub fn invoke(&self, name: &str, input: &Value) -> Option<ToolResult> {
        self.action(name).map(|action| action.invoke(input))
    }
}
