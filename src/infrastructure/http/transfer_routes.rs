use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use super::import_error;
use crate::application::dto::ImportRequest;
use crate::application::services::{ConflictReport, ExportedDocument, ImportResult};
use crate::infrastructure::state::AppState;

pub async fn export_preset(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    state
        .transfer_service
        .export_preset(&name)
        .await
        .map_err(import_error)?
        .map(download)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Preset '{}' not found", name)))
}

pub async fn export_all(
    State(state): State<Arc<AppState>>,
) -> Result<Response, (StatusCode, String)> {
    state
        .transfer_service
        .export_all()
        .await
        .map_err(import_error)?
        .map(download)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "No presets to export".to_string()))
}

/// Takes the uploaded file's text as is
pub async fn preview_import(
    State(state): State<Arc<AppState>>,
    text: String,
) -> Result<Json<ConflictReport>, (StatusCode, String)> {
    let file = state.transfer_service.validate_text(&text).map_err(import_error)?;
    state
        .transfer_service
        .detect_conflicts(file.presets)
        .await
        .map(Json)
        .map_err(import_error)
}

pub async fn import_presets(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ImportResult>, (StatusCode, String)> {
    state
        .transfer_service
        .import_document(&req.document, &req.resolutions)
        .await
        .map(Json)
        .map_err(import_error)
}

fn download(document: ExportedDocument) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/json; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&document.file_name),
            ),
        ],
        document.content,
    )
        .into_response()
}

/// `attachment` header with an RFC 5987 encoded UTF-8 file name
fn content_disposition(file_name: &str) -> String {
    let mut encoded = String::with_capacity(file_name.len() * 3);
    for byte in file_name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    format!("attachment; filename*=UTF-8''{}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_encodes_utf8() {
        assert_eq!(
            content_disposition("A b.preset.json"),
            "attachment; filename*=UTF-8''A%20b.preset.json"
        );
        assert_eq!(
            content_disposition("勇.json"),
            "attachment; filename*=UTF-8''%E5%8B%87.json"
        );
    }
}
