use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::sync_error;
use crate::application::dto::{
    CatalogTablesDto, CostDto, CostQuery, ReincarnationRollDto, ReincarnationRollQuery,
};
use crate::application::services::CommitOutcome;
use crate::domain::entities::CharacterDraft;
use crate::infrastructure::state::AppState;

pub async fn commit_character(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<CharacterDraft>,
) -> Result<Json<CommitOutcome>, (StatusCode, String)> {
    state
        .character_service
        .commit(&draft)
        .await
        .map(Json)
        .map_err(sync_error)
}

pub async fn character_prompt(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<CharacterDraft>,
) -> Json<Value> {
    Json(json!({ "prompt": state.character_service.prompt(&draft) }))
}

pub async fn reincarnation_roll(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReincarnationRollQuery>,
) -> Json<ReincarnationRollDto> {
    Json(ReincarnationRollDto {
        reincarnation_points: state.character_service.roll_reincarnation(&query.name),
    })
}

pub async fn catalog_tables() -> Json<CatalogTablesDto> {
    Json(CatalogTablesDto::current())
}

pub async fn rarity_cost(Query(query): Query<CostQuery>) -> Json<CostDto> {
    Json(CostDto::for_query(query))
}
