use std::path::PathBuf;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::clean::{self, CleanError, CleanOutcome};
use crate::http::state::AppState;
use crate::media::library::{FileRecord, ScanResult};
use crate::media::scanner::{self, ScanError};

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub directory: String,
}

#[derive(Debug, Deserialize)]
pub struct CleanRequest {
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DirectoriesResponse {
    pub directories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideoFile {
    pub name: String,
    pub path: String,
    pub title: String,
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScanResponse {
    pub files_scanned: usize,
    pub files_with_metadata: usize,
    pub video_files: Vec<VideoFile>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FailedFile {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CleanResponse {
    pub message: String,
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedFile>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn lossy(path: &std::path::Path) -> String {
    path.to_string_lossy().into_owned()
}

impl From<FileRecord> for VideoFile {
    fn from(record: FileRecord) -> Self {
        VideoFile {
            path: lossy(&record.path),
            name: record.name,
            title: record.title,
            comment: record.comment,
        }
    }
}

impl From<ScanResult> for ScanResponse {
    fn from(result: ScanResult) -> Self {
        ScanResponse {
            files_scanned: result.total_files_visited,
            files_with_metadata: result.records.len(),
            video_files: result.records.into_iter().map(VideoFile::from).collect(),
        }
    }
}

impl From<CleanOutcome> for CleanResponse {
    fn from(outcome: CleanOutcome) -> Self {
        let message = if outcome.failed.is_empty() {
            format!(
                "Successfully cleaned metadata from {} file(s)",
                outcome.succeeded.len()
            )
        } else {
            format!(
                "Cleaned {} file(s), failed on {} file(s)",
                outcome.succeeded.len(),
                outcome.failed.len()
            )
        };
        CleanResponse {
            message,
            succeeded: outcome.succeeded.iter().map(|p| lossy(p)).collect(),
            failed: outcome
                .failed
                .into_iter()
                .map(|f| FailedFile {
                    path: lossy(&f.path),
                    reason: f.reason,
                })
                .collect(),
        }
    }
}

/// Request-level failures, rendered as `{"error": ...}` with a status code.
#[derive(Debug)]
pub enum ApiError {
    Scan(ScanError),
    Clean(CleanError),
    Directories(std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Scan(ScanError::AccessDenied(_)) => (
                StatusCode::BAD_REQUEST,
                "Invalid directory path or access denied".to_string(),
            ),
            ApiError::Scan(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Clean(CleanError::EmptyRequest) => (
                StatusCode::BAD_REQUEST,
                "No files provided for cleaning".to_string(),
            ),
            ApiError::Directories(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to list directories".to_string(),
            ),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// GET /api/directories — directories a client may offer as scan targets.
pub async fn list_directories(
    State(state): State<AppState>,
) -> Result<Json<DirectoriesResponse>, ApiError> {
    let targets = state.roots.scan_targets().await.map_err(|e| {
        tracing::error!("Error listing directories: {}", e);
        ApiError::Directories(e)
    })?;
    Ok(Json(DirectoriesResponse {
        directories: targets.iter().map(|p| lossy(p)).collect(),
    }))
}

/// POST /api/scan — walk one directory and report files with a title or comment.
pub async fn scan_directory(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, ApiError> {
    let directory = PathBuf::from(&request.directory);
    tracing::info!("Scan requested for {:?}", request.directory);

    let result = scanner::scan(&state.roots, state.probe.as_ref(), &directory)
        .await
        .map_err(|e| {
            match &e {
                ScanError::AccessDenied(_) => {
                    tracing::warn!("Invalid directory access attempted: {:?}", request.directory)
                }
                _ => tracing::error!("Error during scan: {}", e),
            }
            ApiError::Scan(e)
        })?;
    Ok(Json(ScanResponse::from(result)))
}

/// POST /api/clean — strip metadata from the listed files, reporting each outcome.
pub async fn clean_files(
    State(state): State<AppState>,
    Json(request): Json<CleanRequest>,
) -> Result<Json<CleanResponse>, ApiError> {
    let paths: Vec<PathBuf> = request.files.iter().map(PathBuf::from).collect();
    tracing::info!("Cleaning metadata for {} files", paths.len());

    let outcome = clean::clean(&state.roots, state.sanitizer.as_ref(), &paths)
        .await
        .map_err(|e| {
            tracing::warn!("Rejected clean request: {}", e);
            ApiError::Clean(e)
        })?;
    Ok(Json(CleanResponse::from(outcome)))
}
