use std::path::Path;

/// Container extensions treated as media files. Everything else is only counted.
pub const MEDIA_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm"];

/// Whether `path` names a media file by extension.
///
/// Extensions are matched case-insensitively. A file without an extension,
/// or with one outside `MEDIA_EXTENSIONS`, is not media.
pub fn is_media_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    MEDIA_EXTENSIONS.contains(&ext.as_str())
}
