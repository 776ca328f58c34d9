//! External tools the server drives: a probe that reads embedded tags and a
//! sanitizer that strips them in place. Both sit behind traits so the scanner
//! and the cleaning batch can run against fakes.

pub mod ffprobe;
pub mod script;

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

/// Reads the container-level tags of one media file.
#[async_trait]
pub trait MetadataProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<HashMap<String, String>, ToolError>;
}

/// Removes the embedded textual metadata of one media file in place.
#[async_trait]
pub trait MetadataSanitizer: Send + Sync {
    async fn sanitize(&self, path: &Path) -> Result<(), ToolError>;
}

/// Failure of a single probe or sanitizer invocation.
/// The `Display` text doubles as the per-file reason reported to clients.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with status {status}: {stderr}")]
    Exited {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("failed to parse {tool} output")]
    Parse { tool: &'static str },
    #[error("{0}")]
    Rejected(String),
}

impl ToolError {
    /// Build an `Exited` error from a finished process.
    pub(crate) fn exited(program: &str, output: &std::process::Output) -> Self {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        ToolError::Exited {
            program: program.to_string(),
            status: output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            stderr: if stderr.is_empty() {
                "no error output".to_string()
            } else {
                stderr.to_string()
            },
        }
    }
}
