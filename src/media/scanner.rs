use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use crate::access::{self, AllowedRoots};
use crate::media::library::{FileRecord, ScanResult};
use crate::media::mime::is_media_file;
use crate::media::tags::TagSummary;
use crate::tools::MetadataProbe;

/// Request-level scan failures. Per-file problems never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("access denied: {0}")]
    AccessDenied(PathBuf),
    #[error("cannot list directory {path}: {source}")]
    ScanFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("directory walk of {0} was interrupted")]
    Interrupted(PathBuf),
}

/// The filesystem half of a scan: every regular file counted, media files
/// collected in traversal order for probing.
struct Walk {
    total_files: usize,
    media: Vec<PathBuf>,
}

/// Scan `directory` for media files carrying an embedded title or comment.
///
/// The directory must pass the containment check and be listable, otherwise
/// the whole request fails. Below the root, failures stay local: an unreadable
/// subdirectory contributes nothing and a failed probe yields no record, while
/// the rest of the tree is still reported. Probes run one at a time.
pub async fn scan(
    roots: &AllowedRoots,
    probe: &dyn MetadataProbe,
    directory: &Path,
) -> Result<ScanResult, ScanError> {
    let start = Instant::now();

    let guard = roots.clone();
    let requested = directory.to_owned();
    let (root, walk) = tokio::task::spawn_blocking(move || prepare_and_walk(&guard, &requested))
        .await
        .map_err(|e| {
            tracing::error!("Directory walk of {} panicked: {}", directory.display(), e);
            ScanError::Interrupted(directory.to_owned())
        })??;

    let mut records = Vec::new();
    for path in &walk.media {
        if let Some(record) = probe_file(probe, path).await {
            records.push(record);
        }
    }

    tracing::info!(
        "Scanned {} files ({} media, {} with metadata) under {} in {:.1}s",
        walk.total_files,
        walk.media.len(),
        records.len(),
        root.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(ScanResult {
        total_files_visited: walk.total_files,
        records,
    })
}

/// Every filesystem step of a scan, run on the blocking pool: containment,
/// resolution, the root listing, and the walk itself.
fn prepare_and_walk(roots: &AllowedRoots, directory: &Path) -> Result<(PathBuf, Walk), ScanError> {
    if !roots.is_allowed(directory) {
        return Err(ScanError::AccessDenied(directory.to_owned()));
    }
    let root = access::resolve(directory)
        .ok_or_else(|| ScanError::AccessDenied(directory.to_owned()))?;

    // Listing the root up front separates "root unreadable" from the
    // contained subdirectory failures walkdir reports later.
    std::fs::read_dir(&root).map_err(|source| ScanError::ScanFailure {
        path: root.clone(),
        source,
    })?;

    let mut walk = walk_tree(&root);
    // Re-check each file against the guard before its tags are read.
    walk.media.retain(|path| {
        let allowed = roots.is_allowed(path);
        if !allowed {
            tracing::warn!("Skipping {} -- outside allowed roots", path.display());
        }
        allowed
    });
    Ok((root, walk))
}

/// Depth-first, pre-order walk. Symlinks are not followed, so every path
/// stays under `root`; entries are sorted by name for a reproducible order.
fn walk_tree(root: &Path) -> Walk {
    let mut walk = Walk {
        total_files: 0,
        media: Vec::new(),
    };

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        match entry {
            Err(e) => {
                // Unreadable subdirectory: that subtree contributes nothing.
                tracing::warn!("Cannot access entry: {}", e);
            }
            Ok(entry) if entry.file_type().is_file() => {
                walk.total_files += 1;
                if is_media_file(entry.path()) {
                    walk.media.push(entry.into_path());
                } else {
                    tracing::debug!("Skipping non-media file: {}", entry.path().display());
                }
            }
            Ok(_) => {} // directories and symlinks
        }
    }

    walk
}

async fn probe_file(probe: &dyn MetadataProbe, path: &Path) -> Option<FileRecord> {
    let tags = match probe.probe(path).await {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!("Probe failed for {}: {}", path.display(), e);
            return None;
        }
    };

    let summary = TagSummary::from_tags(&tags);
    if summary.is_empty() {
        tracing::debug!("No title or comment in {}", path.display());
        return None;
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::debug!(
        "Found metadata in {}: title={:?} comment={:?}",
        name,
        summary.title,
        summary.comment
    );

    Some(FileRecord {
        path: path.to_owned(),
        name,
        title: summary.title,
        comment: summary.comment,
    })
}
