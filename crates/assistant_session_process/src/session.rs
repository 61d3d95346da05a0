use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::Duration;

use assistant_session::{
    AssistantSession, CapabilityRegistry, SessionBackend, SessionConfig, SessionError,
    StreamEvent, ToolResult,
};
use wait_timeout::ChildExt;

use crate::config::ProcessBackendConfig;
use crate::wire::{self, WireEvent};

/// Opens assistant sessions as child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessSessionBackend {
    config: ProcessBackendConfig,
}

impl ProcessSessionBackend {
    #[must_use]
    pub fn new(config: ProcessBackendConfig) -> Self {
        Self { config }
    }

    fn build_command(&self, config: &SessionConfig) -> Command {
        let mut command = Command::new(&self.config.program);
        command.args(&self.config.base_args);
        command.arg("--model").arg(&config.model);
        command.arg("--cwd").arg(&config.cwd);

        if let Some(preset) = &config.system_prompt_preset {
            command.arg("--system-preset").arg(preset);
        }

        for source in &config.setting_sources {
            command.arg("--setting-source").arg(source);
        }

        if config.bypass_permissions {
            command.arg("--bypass-permissions");
        }

        for action in &config.allowed_actions {
            command.arg("--allowed-action").arg(action);
        }

        command
            .arg("--capabilities")
            .arg(wire::capability_manifest(&config.capability_servers));

        if let Some(resume) = &config.resume {
            command.arg("--resume").arg(resume);
        }

        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        command
    }
}

impl SessionBackend for ProcessSessionBackend {
    fn open(&self, config: SessionConfig) -> Result<Box<dyn AssistantSession>, SessionError> {
        let mut child = self
            .build_command(&config)
            .spawn()
            .map_err(SessionError::spawn)?;

        let stdin = child
            .stdin
            .take()
            .ok_or(SessionError::Pipe { stream: "stdin" })?;
        let stdout = child
            .stdout
            .take()
            .ok_or(SessionError::Pipe { stream: "stdout" })?;

        Ok(Box::new(ProcessSession {
            child,
            stdin: Some(stdin),
            reader: BufReader::new(stdout),
            servers: config.capability_servers,
            kill_wait: self.config.kill_wait,
        }))
    }
}

struct ProcessSession {
    child: Child,
    stdin: Option<ChildStdin>,
    reader: BufReader<ChildStdout>,
    servers: BTreeMap<String, CapabilityRegistry>,
    kill_wait: Duration,
}

impl ProcessSession {
    fn write_line(&mut self, line: &str) -> Result<(), SessionError> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or(SessionError::Pipe { stream: "stdin" })?;
        writeln!(stdin, "{line}").map_err(SessionError::submit)?;
        stdin.flush().map_err(SessionError::submit)
    }

    fn answer_capability_call(
        &mut self,
        id: &str,
        server: &str,
        action: &str,
        input: &serde_json::Value,
    ) -> Result<(), SessionError> {
        let result = self
            .servers
            .get(server)
            .and_then(|registry| registry.invoke(action, input))
            .unwrap_or_else(|| {
                ToolResult::error_text(format!("unknown capability action '{server}/{action}'"))
            });

        self.write_line(&wire::capability_result_line(id, &result))
    }
}

impl AssistantSession for ProcessSession {
    fn submit(&mut self, instruction: &str) -> Result<(), SessionError> {
        self.write_line(&wire::user_line(instruction))
    }

    fn next_event(&mut self) -> Result<Option<StreamEvent>, SessionError> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(SessionError::stream)?;
            if read == 0 {
                return Ok(None);
            }

            match wire::decode_line(&line) {
                Some(WireEvent::Stream(event)) => return Ok(Some(event)),
                Some(WireEvent::CapabilityCall {
                    id,
                    server,
                    action,
                    input,
                }) => self.answer_capability_call(&id, &server, &action, &input)?,
                // Malformed frames are dropped; the stream stays usable.
                None => {}
            }
        }
    }
}

impl Drop for ProcessSession {
    fn drop(&mut self) {
        // Closing stdin first lets a well-behaved child exit on its own.
        drop(self.stdin.take());
        let _ = self.child.kill();
        match self.child.wait_timeout(self.kill_wait) {
            Ok(Some(_)) => {}
            // Still running after the bound, or the wait itself failed:
            // fall back to a blocking reap so no zombie is left behind.
            Ok(None) | Err(_) => {
                let _ = self.child.wait();
            }
        }
    }
}
