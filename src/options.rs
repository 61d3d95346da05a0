//! Session configuration for the preview run.
//!
//! Pure construction: fixed preset, sandbox root, model, and action
//! whitelist, plus the capability registry and an optional resume handle.
//! The only I/O is reading the resume handle from the environment.

use std::path::PathBuf;

use assistant_session::{CapabilityRegistry, SessionConfig};

use crate::capabilities::CAPABILITY_SERVER_NAME;

/// Sandbox root of the preview application.
pub const APP_ROOT: &str = "/home/user/app";

/// Model the session runs against.
pub const MODEL_ID: &str = "claude-opus-4-5-20251101";

/// Behavior preset selector handed to the assistant runtime.
pub const SYSTEM_PROMPT_PRESET: &str = "claude_code";

/// Configuration sources the runtime should honor.
pub const SETTING_SOURCES: [&str; 1] = ["project"];

/// Environment variable carrying the resume handle.
pub const RESUME_SESSION_ENV: &str = "RESUME_SESSION_ID";

/// Filesystem/shell/task actions the assistant may invoke. Deploy-class
/// actions are deliberately not on this list; the deploy name only exists as
/// the stub inside the capability registry.
pub const ALLOWED_ACTIONS: [&str; 8] = [
    "Bash", "Write", "Read", "Edit", "Glob", "Grep", "Task", "TodoWrite",
];

/// Reads the resume handle, trimmed; unset or empty means a fresh session.
#[must_use]
pub fn resume_handle_from_env() -> Option<String> {
    std::env::var(RESUME_SESSION_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Builds the immutable configuration for one unattended preview session.
///
/// Permission checks are bypassed entirely: nobody is attending the run, and
/// instant writes are what make the live preview work.
#[must_use]
pub fn session_config(registry: CapabilityRegistry, resume: Option<String>) -> SessionConfig {
    SessionConfig::new(MODEL_ID, PathBuf::from(APP_ROOT))
        .with_system_prompt_preset(SYSTEM_PROMPT_PRESET)
        .with_setting_sources(SETTING_SOURCES)
        .with_capability_server(CAPABILITY_SERVER_NAME, registry)
        .with_bypass_permissions(true)
        .with_allowed_actions(ALLOWED_ACTIONS)
        .with_resume(resume)
}

#[cfg(test)]
mod tests {
    use crate::capabilities::{deployment_registry, CAPABILITY_SERVER_NAME, DEPLOY_ACTION};

    use super::{session_config, ALLOWED_ACTIONS, APP_ROOT, MODEL_ID};

    #[test]
    fn configuration_pins_the_unattended_preview_policy() {
        let config = session_config(deployment_registry(), None);

        assert!(config.bypass_permissions);
        assert_eq!(config.cwd.to_str(), Some(APP_ROOT));
        assert_eq!(config.model, MODEL_ID);
        assert_eq!(config.setting_sources, vec!["project".to_string()]);
        assert_eq!(config.allowed_actions, ALLOWED_ACTIONS.map(str::to_string));
        assert!(config.resume.is_none());
    }

    #[test]
    fn allowed_actions_never_include_a_deploy_class_name() {
        assert!(!ALLOWED_ACTIONS.contains(&DEPLOY_ACTION));
    }

    #[test]
    fn capability_map_holds_exactly_the_deployment_registry() {
        let config = session_config(deployment_registry(), None);

        assert_eq!(config.capability_servers.len(), 1);
        let registry = config
            .capability_servers
            .get(CAPABILITY_SERVER_NAME)
            .expect("deployment server should be mounted");
        assert!(registry.action(DEPLOY_ACTION).is_some());
    }

    #[test]
    fn resume_handle_is_copied_through_verbatim() {
        let config = session_config(deployment_registry(), Some("sess-42".to_string()));
        assert_eq!(config.resume.as_deref(), Some("sess-42"));
    }
}
