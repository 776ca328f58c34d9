//! Bulk metadata removal over a client-chosen list of files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::access::{self, AllowedRoots};
use crate::tools::MetadataSanitizer;

/// Reason recorded for a path outside the allowed roots.
pub const ACCESS_DENIED: &str = "access denied";

#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    #[error("no files provided for cleaning")]
    EmptyRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Per-file ledger of one cleaning batch. Paths are reported as requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanOutcome {
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<CleanFailure>,
}

impl CleanOutcome {
    fn fail(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.failed.push(CleanFailure {
            path,
            reason: reason.into(),
        });
    }
}

/// Strip metadata from every path in `paths`, in request order.
///
/// Paths naming the same file (after resolving symlinks and `..`) are
/// sanitized once; the first spelling is the one reported. Each distinct file
/// ends up in exactly one of `succeeded` or `failed`. A path outside the
/// allowed roots or a sanitizer failure is recorded and the batch moves on;
/// only an empty request fails the call as a whole.
pub async fn clean(
    roots: &AllowedRoots,
    sanitizer: &dyn MetadataSanitizer,
    paths: &[PathBuf],
) -> Result<CleanOutcome, CleanError> {
    if paths.is_empty() {
        return Err(CleanError::EmptyRequest);
    }

    let mut outcome = CleanOutcome::default();
    let mut seen = HashSet::new();

    for path in paths {
        let (resolved, allowed) = check_path(roots, path).await;

        // Unresolvable paths have no canonical identity; key them as written.
        let key = resolved.clone().unwrap_or_else(|| path.clone());
        if !seen.insert(key) {
            tracing::info!("Skipping {} -- same file already in this batch", path.display());
            continue;
        }

        let resolved = match resolved {
            Some(resolved) if allowed => resolved,
            _ => {
                tracing::warn!("Access denied to {}", path.display());
                outcome.fail(path.clone(), ACCESS_DENIED);
                continue;
            }
        };

        tracing::debug!("Cleaning metadata for {}", resolved.display());
        match sanitizer.sanitize(&resolved).await {
            Ok(()) => {
                tracing::debug!("Cleaned {}", path.display());
                outcome.succeeded.push(path.clone());
            }
            Err(e) => {
                tracing::error!("Failed to clean {}: {}", path.display(), e);
                outcome.fail(path.clone(), e.to_string());
            }
        }
    }

    tracing::info!(
        "Cleaning completed. Successful: {}, Failed: {}",
        outcome.succeeded.len(),
        outcome.failed.len()
    );
    Ok(outcome)
}

/// Resolve `path` and test containment off the async worker threads.
async fn check_path(roots: &AllowedRoots, path: &Path) -> (Option<PathBuf>, bool) {
    let roots = roots.clone();
    let path = path.to_owned();
    tokio::task::spawn_blocking(move || {
        let resolved = access::resolve(&path);
        let allowed = resolved.as_deref().is_some_and(|r| roots.is_allowed(r));
        (resolved, allowed)
    })
    .await
    .unwrap_or_else(|e| {
        tracing::error!("Containment check panicked: {}", e);
        (None, false)
    })
}
