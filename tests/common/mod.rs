#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use metascrub::tools::{MetadataProbe, MetadataSanitizer, ToolError};

/// Probe answering from a fixed table keyed by file name.
/// Files missing from the table fail like an unreadable container.
#[derive(Default)]
pub struct FakeProbe {
    tags: HashMap<String, HashMap<String, String>>,
    pub calls: Mutex<Vec<PathBuf>>,
}

impl FakeProbe {
    pub fn with(mut self, file_name: &str, tags: &[(&str, &str)]) -> Self {
        let map = tags
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.tags.insert(file_name.to_string(), map);
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataProbe for FakeProbe {
    async fn probe(&self, path: &Path) -> Result<HashMap<String, String>, ToolError> {
        self.calls.lock().unwrap().push(path.to_owned());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.tags
            .get(&name)
            .cloned()
            .ok_or_else(|| ToolError::Rejected(format!("cannot probe {name}")))
    }
}

/// Sanitizer that fails for file names listed in `failing` and succeeds otherwise.
#[derive(Default)]
pub struct FakeSanitizer {
    failing: HashMap<String, String>,
    pub calls: Mutex<Vec<PathBuf>>,
}

impl FakeSanitizer {
    pub fn failing(mut self, file_name: &str, reason: &str) -> Self {
        self.failing.insert(file_name.to_string(), reason.to_string());
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataSanitizer for FakeSanitizer {
    async fn sanitize(&self, path: &Path) -> Result<(), ToolError> {
        self.calls.lock().unwrap().push(path.to_owned());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        match self.failing.get(&name) {
            Some(reason) => Err(ToolError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

/// Create `rel` (and its parents) under `root` as an empty file.
pub fn touch(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"").unwrap();
    path
}

/// Canonical form of a temp directory (macOS tempdirs live behind /private).
pub fn canonical(dir: &tempfile::TempDir) -> PathBuf {
    std::fs::canonicalize(dir.path()).unwrap()
}
