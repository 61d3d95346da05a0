//! Instruction resolution and rendering.
//!
//! The run instruction comes from an ordered supplier chain (durable prompt
//! file, then process environment, then the built-in initial-build default)
//! and is rendered into one of two templates depending on whether a user
//! supplied an incremental change request.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::capabilities::DEPLOY_ACTION;
use crate::emitter::diag;

/// Durable prompt file name inside the application root. Preferred over the
/// environment variable because file contents survive shell quoting.
pub const PROMPT_FILE_NAME: &str = ".user_prompt";

/// Environment fallback for the incremental-change prompt.
pub const USER_PROMPT_ENV: &str = "USER_PROMPT";

/// View file the preview session edits or builds.
pub const PREVIEW_TARGET: &str = "src/pages/Dashboard.tsx";

/// Where a resolved user prompt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptSource {
    File,
    Environment,
}

/// A resolved incremental-change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPrompt {
    pub text: String,
    pub source: PromptSource,
}

/// Reads the `USER_PROMPT` environment variable, trimmed; unset or empty
/// means absent.
#[must_use]
pub fn user_prompt_from_env() -> Option<String> {
    std::env::var(USER_PROMPT_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Reads the durable prompt file, trimmed.
///
/// A missing file or whitespace-only contents mean absent. A read failure is
/// logged and also treated as absent so the run falls through to the next
/// source instead of aborting.
#[must_use]
pub fn user_prompt_from_file(path: &Path) -> Option<String> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == ErrorKind::NotFound => return None,
        Err(error) => {
            diag(format!(
                "failed to read prompt file {}: {error}",
                path.display()
            ));
            return None;
        }
    };

    let trimmed = contents.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Resolves the user prompt through the ordered source chain: file first,
/// then the provided environment value.
#[must_use]
pub fn resolve_user_prompt(prompt_file: &Path, env_value: Option<String>) -> Option<UserPrompt> {
    user_prompt_from_file(prompt_file)
        .map(|text| UserPrompt {
            text,
            source: PromptSource::File,
        })
        .or_else(|| {
            env_value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(|text| UserPrompt {
                    text,
                    source: PromptSource::Environment,
                })
        })
}

/// Diagnostic narration for a resolution outcome: where the prompt came
/// from, echoing its text, or the build-mode notice when nothing resolved.
#[must_use]
pub fn resolution_notes(resolved: Option<&UserPrompt>) -> Vec<String> {
    match resolved {
        Some(prompt) => {
            let origin = match prompt.source {
                PromptSource::File => format!(
                    "prompt read from file: {} characters",
                    prompt.text.chars().count()
                ),
                PromptSource::Environment => "prompt read from environment".to_string(),
            };
            vec![origin, format!("user prompt: \"{}\"", prompt.text)]
        }
        None => vec!["build mode: creating the dashboard (preview)".to_string()],
    }
}

/// Renders the instruction for this run: the incremental-change template
/// when a user prompt was resolved, the initial-build template otherwise.
#[must_use]
pub fn instruction_for(user_prompt: Option<&str>) -> String {
    match user_prompt {
        Some(prompt) => incremental_instruction(prompt),
        None => initial_build_instruction(),
    }
}

/// Incremental-change template: one discrete, immediately persisted change
/// at a time so the live preview updates between steps.
#[must_use]
pub fn incremental_instruction(user_prompt: &str) -> String {
    format!(
        "LIVE PREVIEW MODE - the user is watching your changes in real time.\n\
         \n\
         User request: \"{user_prompt}\"\n\
         \n\
         IMPORTANT: the dev server is already running. Every file write shows up in the \
         browser immediately.\n\
         \n\
         Steps (work incrementally so each update is visible):\n\
         \n\
         1. READ: read {PREVIEW_TARGET} to understand the current structure.\n\
         \n\
         2. CHANGE (step by step!): exactly one discrete change at a time. The file is \
         written immediately, so the user sees it live. Then move on to the next change.\n\
         \n\
         3. VERIFY: finish with 'npm run build' to make sure everything compiles.\n\
         \n\
         Critical for the live preview:\n\
         - Work step by step, never everything at once.\n\
         - Every file change is a live update in the browser.\n\
         - Do NOT call {DEPLOY_ACTION}. The user tests the changes in the live preview and \
         deploys manually.\n\
         \n\
         The dashboard already exists. Make only the requested changes. Start now."
    )
}

/// Initial-build template: analyze the app, produce a design brief, build
/// the target view from it; success criterion is a clean build.
#[must_use]
pub fn initial_build_instruction() -> String {
    format!(
        "PREVIEW MODE - build the new dashboard without auto-deploy.\n\
         \n\
         Analyze the surrounding application structure and generate design_brief.md.\n\
         Build {PREVIEW_TARGET} following design_brief.md exactly.\n\
         Use the existing shared types and services from src/types/ and src/services/.\n\
         \n\
         IMPORTANT:\n\
         - Do NOT call {DEPLOY_ACTION}. The user reviews the dashboard in the live preview \
         first and deploys manually.\n\
         - You are done when 'npm run build' succeeds."
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::capabilities::DEPLOY_ACTION;

    use super::{
        instruction_for, resolution_notes, resolve_user_prompt, PromptSource, UserPrompt,
        PROMPT_FILE_NAME, PREVIEW_TARGET,
    };

    #[test]
    fn file_contents_win_over_the_environment() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let prompt_file = dir.path().join(PROMPT_FILE_NAME);
        fs::write(&prompt_file, "  make the header blue \n").expect("write should succeed");

        let resolved = resolve_user_prompt(&prompt_file, Some("env prompt".to_string()))
            .expect("file prompt should resolve");
        assert_eq!(resolved.text, "make the header blue");
        assert_eq!(resolved.source, PromptSource::File);
    }

    #[test]
    fn whitespace_only_file_falls_through_to_the_environment() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let prompt_file = dir.path().join(PROMPT_FILE_NAME);
        fs::write(&prompt_file, "  \n\t  ").expect("write should succeed");

        let resolved = resolve_user_prompt(&prompt_file, Some(" env prompt ".to_string()))
            .expect("environment prompt should resolve");
        assert_eq!(resolved.text, "env prompt");
        assert_eq!(resolved.source, PromptSource::Environment);
    }

    #[test]
    fn unreadable_prompt_file_falls_through_to_the_environment() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let prompt_file = dir.path().join(PROMPT_FILE_NAME);
        // A directory at the prompt path fails the read with something other
        // than NotFound.
        fs::create_dir(&prompt_file).expect("dir should create");

        let resolved = resolve_user_prompt(&prompt_file, Some("env prompt".to_string()))
            .expect("environment prompt should resolve");
        assert_eq!(resolved.text, "env prompt");
        assert_eq!(resolved.source, PromptSource::Environment);
    }

    #[test]
    fn missing_file_and_empty_environment_resolve_to_nothing() {
        let dir = tempfile::tempdir().expect("tempdir should create");
        let prompt_file = dir.path().join(PROMPT_FILE_NAME);

        assert_eq!(resolve_user_prompt(&prompt_file, None), None);
        assert_eq!(resolve_user_prompt(&prompt_file, Some("   ".to_string())), None);
    }

    #[test]
    fn resolution_notes_echo_the_resolved_prompt_text() {
        let prompt = UserPrompt {
            text: "make the header blue".to_string(),
            source: PromptSource::File,
        };

        let notes = resolution_notes(Some(&prompt));
        assert_eq!(notes.len(), 2);
        assert!(notes[0].starts_with("prompt read from file"));
        assert_eq!(notes[1], "user prompt: \"make the header blue\"");

        assert_eq!(
            resolution_notes(None),
            vec!["build mode: creating the dashboard (preview)".to_string()]
        );
    }

    #[test]
    fn incremental_instruction_embeds_prompt_and_forbids_deploy() {
        let instruction = instruction_for(Some("make the header blue"));

        assert!(instruction.contains("make the header blue"));
        assert!(instruction.contains(PREVIEW_TARGET));
        assert!(instruction.contains(&format!("Do NOT call {DEPLOY_ACTION}")));
        assert!(instruction.contains("npm run build"));
    }

    #[test]
    fn initial_build_instruction_directs_a_fresh_build() {
        let instruction = instruction_for(None);

        assert!(instruction.contains("design_brief.md"));
        assert!(instruction.contains(PREVIEW_TARGET));
        assert!(instruction.contains(&format!("Do NOT call {DEPLOY_ACTION}")));
        assert!(instruction.contains("npm run build"));
    }
}
