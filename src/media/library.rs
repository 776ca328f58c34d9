use std::path::PathBuf;

/// A media file whose probe reported a non-empty title or comment.
/// Built once during a scan and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute path beneath the scanned directory.
    pub path: PathBuf,
    /// Base file name, e.g. "holiday.mp4".
    pub name: String,
    /// Embedded title; empty when only a comment is present.
    pub title: String,
    /// Embedded comment; empty when only a title is present.
    pub comment: String,
}

/// Outcome of one scan request.
///
/// `total_files_visited` counts every regular file reached in the subtree,
/// media or not, so it is never smaller than `records.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub total_files_visited: usize,
    /// Records in traversal order (pre-order, entries sorted by file name).
    pub records: Vec<FileRecord>,
}
