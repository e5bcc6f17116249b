//! Audio upload persistence.
//!
//! The store only ever records a sanitized filename; writing the bytes under
//! the configured upload directory is the whole of this module's job.

use std::path::Path;

use axum::body::Bytes;

use crate::error::{AppError, AppResult};

/// Strips path components and anything outside `[A-Za-z0-9._-]` from a
/// client-supplied filename. Returns `None` when nothing safe remains.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Writes `bytes` under `upload_dir` keyed by the sanitized filename and
/// returns the filename reference to record in the store.
pub async fn save_audio(upload_dir: &Path, raw_filename: &str, bytes: Bytes) -> AppResult<String> {
    let filename = sanitize_filename(raw_filename)
        .ok_or_else(|| AppError::validation("invalid audio filename"))?;
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    tokio::fs::write(upload_dir.join(&filename), &bytes)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(filename)
}
