use std::io;
use std::path::Path;

use assistant_session_process::{ProcessBackendConfig, ProcessSessionBackend};
use preview_agent::emitter::{diag, EventEmitter};
use preview_agent::{capabilities, options, prompt, runner};

fn main() -> io::Result<()> {
    let root = Path::new(options::APP_ROOT);

    let resume = options::resume_handle_from_env();
    if let Some(resume) = &resume {
        diag(format_args!("resuming session: {resume}"));
    }

    let user_prompt = prompt::resolve_user_prompt(
        &root.join(prompt::PROMPT_FILE_NAME),
        prompt::user_prompt_from_env(),
    );
    for note in prompt::resolution_notes(user_prompt.as_ref()) {
        diag(note);
    }
    let instruction = prompt::instruction_for(user_prompt.as_ref().map(|p| p.text.as_str()));

    let config = options::session_config(capabilities::deployment_registry(), resume);
    diag("initializing assistant session");

    let backend = ProcessSessionBackend::new(ProcessBackendConfig::default());
    let mut emitter = EventEmitter::new(io::stdout(), root);
    runner::run_session(&backend, config, &instruction, &mut emitter).map_err(io::Error::other)
}
