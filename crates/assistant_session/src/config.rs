use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::capability::CapabilityRegistry;

/// Immutable description of how one session is opened.
///
/// Built once per run and handed to the backend by value; nothing mutates it
/// after the session opens.
#[derive(Debug)]
pub struct SessionConfig {
    /// Behavior-preset selector understood by the assistant runtime.
    pub system_prompt_preset: Option<String>,
    /// Configuration-source names the runtime should honor.
    pub setting_sources: Vec<String>,
    /// Capability registries keyed by server name.
    pub capability_servers: BTreeMap<String, CapabilityRegistry>,
    /// Skip interactive confirmation entirely; required for unattended runs.
    pub bypass_permissions: bool,
    /// Ordered whitelist of action names the assistant may invoke.
    pub allowed_actions: Vec<String>,
    /// Working directory for the session.
    pub cwd: PathBuf,
    /// Model identifier.
    pub model: String,
    /// Resume handle for continuing a previous session, when present.
    pub resume: Option<String>,
}

impl SessionConfig {
    #[must_use]
    pub fn new(model: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            system_prompt_preset: None,
            setting_sources: Vec::new(),
            capability_servers: BTreeMap::new(),
            bypass_permissions: false,
            allowed_actions: Vec::new(),
            cwd: cwd.into(),
            model: model.into(),
            resume: None,
        }
    }

    #[must_use]
    pub fn with_system_prompt_preset(mut self, preset: impl Into<String>) -> Self {
        self.system_prompt_preset = Some(preset.into());
        self
    }

    #[must_use]
    pub fn with_setting_sources(
        mut self,
        sources: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.setting_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_capability_server(
        mut self,
        server_name: impl Into<String>,
        registry: CapabilityRegistry,
    ) -> Self {
        self.capability_servers.insert(server_name.into(), registry);
        self
    }

    #[must_use]
    pub fn with_bypass_permissions(mut self, bypass: bool) -> Self {
        self.bypass_permissions = bypass;
        self
    }

    #[must_use]
    pub fn with_allowed_actions(
        mut self,
        actions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.allowed_actions = actions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_resume(mut self, resume: Option<String>) -> Self {
        self.resume = resume;
        self
    }
}
