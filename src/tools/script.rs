use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::{MetadataSanitizer, ToolError};

/// One status object printed by the sanitizer script.
#[derive(Debug, Deserialize)]
struct ScriptStatus {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Interpret the sanitizer's stdout: a JSON array whose first element is
/// `{"status": "success" | "error", "message": ...}`.
pub fn parse_script_output(stdout: &[u8]) -> Result<(), ToolError> {
    let statuses: Vec<ScriptStatus> =
        serde_json::from_slice(stdout).map_err(|_| ToolError::Parse { tool: "sanitizer" })?;
    let first = statuses
        .into_iter()
        .next()
        .ok_or(ToolError::Parse { tool: "sanitizer" })?;

    if first.status == "success" {
        return Ok(());
    }
    Err(ToolError::Rejected(
        first
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "unknown error from sanitizer".to_string()),
    ))
}

/// Sanitizer client that runs an external command with the file path appended,
/// e.g. `python3 clean_metadata.py /media/x.mp4`. The command is spawned
/// directly, never through a shell.
#[derive(Debug, Clone)]
pub struct ScriptSanitizer {
    program: String,
    args: Vec<String>,
}

impl ScriptSanitizer {
    /// `command[0]` is the program, the rest are leading arguments.
    /// Returns `None` for an empty command.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl MetadataSanitizer for ScriptSanitizer {
    async fn sanitize(&self, path: &Path) -> Result<(), ToolError> {
        tracing::debug!(path = %path.display(), "Running {} {:?}", self.program, self.args);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ToolError::exited(&self.program, &output));
        }

        let result = parse_script_output(&output.stdout);
        if result.is_err() {
            tracing::debug!(
                "Sanitizer stdout for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stdout).trim()
            );
        }
        result
    }
}
