use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::{MetadataProbe, ToolError};

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<Format>,
}

#[derive(Debug, Deserialize)]
struct Format {
    tags: Option<HashMap<String, String>>,
}

/// Parse the JSON printed by `ffprobe -print_format json -show_format` and
/// return the container tags. A missing `format` or `tags` object is an empty map.
pub fn parse_format_tags(stdout: &[u8]) -> Result<HashMap<String, String>, ToolError> {
    let output: FfprobeOutput =
        serde_json::from_slice(stdout).map_err(|_| ToolError::Parse { tool: "ffprobe" })?;
    Ok(output.format.and_then(|f| f.tags).unwrap_or_default())
}

/// Probe client backed by the `ffprobe` command-line tool.
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    program: String,
}

impl Default for FfprobeProbe {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl FfprobeProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the configured program runs at all.
    pub async fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl MetadataProbe for FfprobeProbe {
    async fn probe(&self, path: &Path) -> Result<HashMap<String, String>, ToolError> {
        tracing::debug!(path = %path.display(), "Probing tags with {}", self.program);

        let output = Command::new(&self.program)
            .args(["-v", "error"])
            .args(["-print_format", "json"])
            .arg("-show_format")
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

        parse_format_tags(&output.stdout)
    }
}
