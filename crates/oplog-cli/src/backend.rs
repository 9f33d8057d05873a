use anyhow::{Context, Result};
use std::process::{Child, Command, Stdio};

/// Backend program queried for log lines
pub const DEFAULT_BACKEND: &str = "logcli";

/// Environment override for the backend program
pub const BACKEND_ENV: &str = "OPLOG_BACKEND";

/// Diagnostic the backend prints when the server severs a tail session at
/// its max duration. Expected and benign; it triggers a reconnect.
pub const MAX_DURATION_DIAGNOSTIC: &str = "reached tail max duration limit";

/// One fully assembled backend invocation: program, ordered flags, query.
#[derive(Debug, Clone)]
pub struct BackendCommand {
    program: String,
    args: Vec<String>,
}

impl BackendCommand {
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }

    /// Resolve the backend program: flag, then environment, then default.
    pub fn resolve_program(flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| std::env::var(BACKEND_ENV).ok())
            .unwrap_or_else(|| DEFAULT_BACKEND.to_string())
    }

    /// Human-readable command line for --dry-run; arguments with whitespace
    /// or quotes are single-quoted so the query can be copy/pasted.
    pub fn render(&self) -> String {
        let mut parts = vec![self.program.clone()];
        for arg in &self.args {
            if arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '|') {
                parts.push(format!("'{}'", arg));
            } else {
                parts.push(arg.clone());
            }
        }
        parts.join(" ")
    }

    /// Spawn for a single-shot query: stdout captured, stderr passed through.
    pub fn spawn(&self) -> Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to launch backend '{}'", self.program))
    }

    /// Spawn for a tail session: both streams captured so the known
    /// disconnect diagnostic can be filtered out of stderr.
    pub fn spawn_tail(&self) -> Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to launch backend '{}'", self.program))
    }
}
