use std::path::PathBuf;
use std::sync::Arc;

use crate::access::AllowedRoots;
use crate::tools::{MetadataProbe, MetadataSanitizer};

/// Shared application state injected into all route handlers via axum::extract::State.
/// Everything here is read-only after startup; requests never share mutable data.
#[derive(Clone)]
pub struct AppState {
    pub roots: Arc<AllowedRoots>,
    pub probe: Arc<dyn MetadataProbe>,
    pub sanitizer: Arc<dyn MetadataSanitizer>,
    /// Browser UI assets served as the router fallback, if configured.
    pub static_dir: Option<PathBuf>,
}
