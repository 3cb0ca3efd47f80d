//! Gift API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use super::{success, ApiResult, Created, SuccessResponse};
use crate::models::{CreateGiftRequest, Gift, ReorderRequest, UpdateGiftRequest};
use crate::AppState;

/// GET /api/gifts/:personId - List one person's gifts.
pub async fn list_gifts(
    State(state): State<AppState>,
    person_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Gift>>> {
    let Path(person_id) = person_id?;
    let gifts = state.service.list_gifts(person_id).await?;
    Ok(Json(gifts))
}

/// POST /api/gifts - Create a new gift.
pub async fn create_gift(
    State(state): State<AppState>,
    payload: Result<Json<CreateGiftRequest>, JsonRejection>,
) -> ApiResult<Created<Gift>> {
    let Json(request) = payload?;
    let gift = state.service.create_gift(&request).await?;
    Ok(Created(gift))
}

/// PUT /api/gifts/:id - Replace a gift's description, link and purchased flag.
pub async fn update_gift(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateGiftRequest>, JsonRejection>,
) -> ApiResult<SuccessResponse> {
    let Path(id) = id?;
    let Json(request) = payload?;
    state.service.update_gift(id, &request).await?;
    success()
}

/// DELETE /api/gifts/:id - Delete a gift.
pub async fn delete_gift(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<SuccessResponse> {
    let Path(id) = id?;
    state.service.delete_gift(id).await?;
    success()
}

/// PUT /api/gifts/reorder - Persist a drag-and-drop order.
pub async fn reorder_gifts(
    State(state): State<AppState>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> ApiResult<SuccessResponse> {
    let Json(request) = payload?;
    state.service.reorder_gifts(&request).await?;
    success()
}
