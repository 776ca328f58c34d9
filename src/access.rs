//! Root-directory containment: every path the server touches must resolve
//! to one of the administrator-approved roots or a descendant of one.

use std::io;
use std::path::{Component, Path, PathBuf};

/// The administrator-approved roots, fixed at startup.
/// Held behind an `Arc` in the router state and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct AllowedRoots {
    roots: Vec<PathBuf>,
}

impl AllowedRoots {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Roots as configured, in configuration order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// True iff `candidate` resolves to a configured root or a path beneath one.
    ///
    /// Both sides are resolved (symlinks and `..` followed) before comparison.
    /// Comparison is component-wise, so root `/data` never admits `/data2`.
    /// Empty or unresolvable input is denied, never an error.
    pub fn is_allowed(&self, candidate: &Path) -> bool {
        let Some(target) = resolve(candidate) else {
            tracing::debug!("Denied unresolvable path {:?}", candidate);
            return false;
        };
        let allowed = self
            .roots
            .iter()
            .filter_map(|root| resolve(root))
            .any(|root| target.starts_with(&root));
        tracing::debug!("Containment check {} -> {}", target.display(), allowed);
        allowed
    }

    /// Directories a client may pick as a scan target.
    ///
    /// With several roots the roots themselves are returned. With a single root
    /// the root comes first, followed by its immediate subdirectories.
    pub async fn scan_targets(&self) -> io::Result<Vec<PathBuf>> {
        let [root] = self.roots.as_slice() else {
            return Ok(self.roots.clone());
        };

        let mut subdirs = Vec::new();
        let mut entries = tokio::fs::read_dir(root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                subdirs.push(entry.path());
            }
        }
        subdirs.sort();

        let mut targets = Vec::with_capacity(subdirs.len() + 1);
        targets.push(root.clone());
        targets.extend(subdirs);
        Ok(targets)
    }
}

/// Resolve `path` to an absolute, symlink-free form.
///
/// The longest existing prefix is canonicalized and any missing tail is
/// appended lexically, so a not-yet-existing path under a root still resolves
/// under that root while `..` in the tail cannot climb out unnoticed.
/// Returns `None` for empty input, input the OS rejects outright, or a path
/// running through a symlink whose target is missing.
pub fn resolve(path: &Path) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        return None;
    }
    let absolute = std::path::absolute(path).ok()?;

    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    let base = loop {
        match std::fs::canonicalize(existing) {
            Ok(canonical) => break canonical,
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => return None,
            Err(_) => match std::fs::symlink_metadata(existing) {
                // Only a truly missing entry may be appended as text. An entry
                // that exists but will not canonicalize (dangling symlink,
                // unreadable parent) cannot be placed, so it is denied.
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tail.extend(existing.components().next_back());
                    existing = existing.parent()?;
                }
                _ => return None,
            },
        }
    };

    let mut resolved = base;
    for component in tail.into_iter().rev() {
        match component {
            Component::Normal(name) => resolved.push(name),
            Component::ParentDir => {
                resolved.pop();
            }
            _ => {}
        }
    }
    Some(resolved)
}
