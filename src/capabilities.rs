//! Capability surface offered to the assistant in preview mode.
//!
//! The deploy action stays registered under its usual name so the assistant
//! does not improvise an unsafe alternative, but its handler is a stub that
//! refuses with a fixed explanation instead of publishing anything.

use assistant_session::{ActionDefinition, CapabilityRegistry, ToolResult};
use serde_json::json;

/// Server name the registry is mounted under in the session configuration.
pub const CAPABILITY_SERVER_NAME: &str = "deploy_tools";

/// Action name of the (disabled) deploy operation.
pub const DEPLOY_ACTION: &str = "deploy_to_github";

/// Fixed refusal returned by the stub. Worded as a status, not an error, so
/// the assistant stops at "do not publish" instead of treating the call as a
/// failure to recover from.
pub const DEPLOY_DISABLED_NOTICE: &str = "PREVIEW MODE: deploy is disabled. The user will test \
    the changes in the live preview first and then deploy manually. Your changes are saved.";

const REGISTRY_NAME: &str = "deployment";
const REGISTRY_VERSION: &str = "1.0.0";

/// Builds the preview-mode registry: exactly one action, the deploy stub.
///
/// The stub takes no required arguments, performs no external side effect,
/// and cannot fail.
#[must_use]
pub fn deployment_registry() -> CapabilityRegistry {
    CapabilityRegistry::new(REGISTRY_NAME, REGISTRY_VERSION).with_action(ActionDefinition::new(
        DEPLOY_ACTION,
        "Not available in preview mode. The user deploys manually after the live preview.",
        json!({}),
        |_input| ToolResult::text(DEPLOY_DISABLED_NOTICE),
    ))
}

#[cfg(test)]
mod tests {
    use assistant_session::ContentPart;
    use serde_json::json;

    use super::{deployment_registry, DEPLOY_ACTION, DEPLOY_DISABLED_NOTICE};

    #[test]
    fn deploy_stub_always_succeeds_with_the_fixed_notice() {
        let registry = deployment_registry();

        for input in [json!({}), json!({ "branch": "main", "force": true })] {
            let result = registry
                .invoke(DEPLOY_ACTION, &input)
                .expect("deploy stub should be registered");
            assert!(!result.is_error);
            assert_eq!(
                result.content,
                vec![ContentPart::Text {
                    text: DEPLOY_DISABLED_NOTICE.to_string(),
                }]
            );
        }
    }

    #[test]
    fn registry_contains_only_the_deploy_stub() {
        let registry = deployment_registry();
        assert_eq!(registry.actions().len(), 1);
        assert!(registry.action(DEPLOY_ACTION).is_some());
    }
}
