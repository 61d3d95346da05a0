use std::path::PathBuf;
use std::time::Duration;

/// Program spawned when no override is configured.
pub const DEFAULT_ASSISTANT_PROGRAM: &str = "claude";

const DEFAULT_KILL_WAIT: Duration = Duration::from_secs(5);

/// Transport configuration for the assistant subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBackendConfig {
    /// Executable to spawn.
    pub program: PathBuf,
    /// Arguments placed before the session flags.
    pub base_args: Vec<String>,
    /// Bound on waiting for the child to exit after a kill during teardown.
    pub kill_wait: Duration,
}

impl Default for ProcessBackendConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_ASSISTANT_PROGRAM),
            base_args: Vec::new(),
            kill_wait: DEFAULT_KILL_WAIT,
        }
    }
}

impl ProcessBackendConfig {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_kill_wait(mut self, kill_wait: Duration) -> Self {
        self.kill_wait = kill_wait;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::{ProcessBackendConfig, DEFAULT_ASSISTANT_PROGRAM};

    #[test]
    fn default_config_targets_the_assistant_program() {
        let config = ProcessBackendConfig::default();
        assert_eq!(config.program, PathBuf::from(DEFAULT_ASSISTANT_PROGRAM));
        assert!(config.base_args.is_empty());
    }

    #[test]
    fn builder_overrides_program_and_args() {
        let config = ProcessBackendConfig::new("bash")
            .with_base_args(["-c", "true"])
            .with_kill_wait(Duration::from_millis(100));

        assert_eq!(config.program, PathBuf::from("bash"));
        assert_eq!(config.base_args, vec!["-c".to_string(), "true".to_string()]);
        assert_eq!(config.kill_wait, Duration::from_millis(100));
    }
}
