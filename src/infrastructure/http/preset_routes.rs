use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::repository_error;
use crate::application::dto::{PresetNameDto, SavePresetRequest, SavePresetResponse};
use crate::application::services::{PresetService, SaveOutcome};
use crate::domain::entities::{CharacterDraft, CharacterPreset};
use crate::infrastructure::state::AppState;

pub async fn list_presets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CharacterPreset>>, (StatusCode, String)> {
    state
        .preset_service
        .list()
        .await
        .map(Json)
        .map_err(repository_error)
}

pub async fn get_preset(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<CharacterPreset>, (StatusCode, String)> {
    state
        .preset_service
        .get(&name)
        .await
        .map_err(repository_error)?
        .map(Json)
        .ok_or_else(|| not_found(&name))
}

pub async fn save_preset(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SavePresetRequest>,
) -> Result<(StatusCode, Json<SavePresetResponse>), (StatusCode, String)> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Preset name must not be empty".to_string()));
    }

    // Overwriting keeps the stored creation time
    let mut preset = PresetService::create_preset(name.clone(), &req.draft);
    if req.overwrite {
        if let Some(existing) = state.preset_service.get(&name).await.map_err(repository_error)? {
            preset.created_at = existing.created_at;
        }
    }

    let outcome = state
        .preset_service
        .save(preset, req.overwrite)
        .await
        .map_err(repository_error)?;

    let status = match outcome {
        SaveOutcome::Created => StatusCode::CREATED,
        SaveOutcome::Overwritten => StatusCode::OK,
        SaveOutcome::Rejected => {
            return Err((
                StatusCode::CONFLICT,
                format!("Preset '{}' already exists", name),
            ))
        }
    };
    Ok((status, Json(SavePresetResponse { name, outcome })))
}

pub async fn delete_preset(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state
        .preset_service
        .delete(&name)
        .await
        .map_err(repository_error)?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&name))
    }
}

pub async fn apply_preset(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<CharacterDraft>, (StatusCode, String)> {
    state
        .preset_service
        .apply(&name)
        .await
        .map_err(repository_error)?
        .map(Json)
        .ok_or_else(|| not_found(&name))
}

pub async fn match_preset(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<CharacterDraft>,
) -> Result<Json<PresetNameDto>, (StatusCode, String)> {
    let name = state
        .preset_service
        .find_matching(&draft)
        .await
        .map_err(repository_error)?;
    Ok(Json(PresetNameDto { name }))
}

pub async fn get_last_used(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PresetNameDto>, (StatusCode, String)> {
    let name = state
        .preset_service
        .last_used()
        .await
        .map_err(repository_error)?;
    Ok(Json(PresetNameDto { name }))
}

pub async fn set_last_used(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PresetNameDto>,
) -> Result<StatusCode, (StatusCode, String)> {
    let Some(name) = req.name.filter(|n| !n.is_empty()) else {
        return Err((StatusCode::BAD_REQUEST, "name is required".to_string()));
    };
    state
        .preset_service
        .set_last_used(&name)
        .await
        .map_err(repository_error)?;
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(name: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Preset '{}' not found", name))
}
