use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::errors::{ActionResult, AppError};
use crate::models::reading::ReadingRow;
use crate::readings::assembler::ReadingSections;
use crate::readings::flow::{generate_reading, GenerateReadingRequest, GeneratedReading};
use crate::readings::translate::translate_reading;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OwnerIdQuery {
    pub owner_id: Uuid,
}

/// POST /api/v1/readings/generate
///
/// The user-interaction boundary for generation: always responds 200 with
/// the `{success, data?, error?}` envelope, never a raw fault.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateReadingRequest>,
) -> Json<ActionResult<GeneratedReading>> {
    match generate_reading(&state.llm, state.readings.as_ref(), request).await {
        Ok(generated) => Json(ActionResult::ok(generated)),
        Err(err) => {
            error!("Destiny reading generation failed: {err}");
            Json(ActionResult::from_error(&err))
        }
    }
}

/// GET /api/v1/readings
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<OwnerIdQuery>,
) -> Result<Json<Vec<ReadingRow>>, AppError> {
    let readings = state.readings.list(params.owner_id).await?;
    Ok(Json(readings))
}

/// DELETE /api/v1/readings/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<OwnerIdQuery>,
) -> Result<StatusCode, AppError> {
    state.readings.delete(params.owner_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub owner_id: Uuid,
    pub name: String,
}

/// PATCH /api/v1/readings/:id/name
pub async fn handle_rename(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RenameRequest>,
) -> Result<StatusCode, AppError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name: must not be empty".to_string()));
    }
    state.readings.rename(request.owner_id, id, name).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub owner_id: Uuid,
    pub target_language: String,
}

/// POST /api/v1/readings/:id/translate
pub async fn handle_translate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<TranslateRequest>,
) -> Json<ActionResult<ReadingSections>> {
    match translate_reading(
        &state.llm,
        state.readings.as_ref(),
        request.owner_id,
        id,
        &request.target_language,
    )
    .await
    {
        Ok(sections) => Json(ActionResult::ok(sections)),
        Err(err) => {
            error!("Translation failed for reading {id}: {err}");
            Json(ActionResult::from_error(&err))
        }
    }
}
