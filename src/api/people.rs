//! People API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use super::{success, ApiResult, Created, SuccessResponse};
use crate::models::{CreatePersonRequest, Person, ReorderRequest, UpdatePersonRequest};
use crate::AppState;

/// GET /api/people - List all people in display order.
pub async fn list_people(State(state): State<AppState>) -> ApiResult<Json<Vec<Person>>> {
    let people = state.service.list_people().await?;
    Ok(Json(people))
}

/// POST /api/people - Create a new person.
pub async fn create_person(
    State(state): State<AppState>,
    payload: Result<Json<CreatePersonRequest>, JsonRejection>,
) -> ApiResult<Created<Person>> {
    let Json(request) = payload?;
    let person = state.service.create_person(&request).await?;
    Ok(Created(person))
}

/// PUT /api/people/:id - Rename a person.
pub async fn update_person(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdatePersonRequest>, JsonRejection>,
) -> ApiResult<SuccessResponse> {
    let Path(id) = id?;
    let Json(request) = payload?;
    state.service.update_person(id, &request).await?;
    success()
}

/// DELETE /api/people/:id - Delete a person and their gifts.
pub async fn delete_person(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<SuccessResponse> {
    let Path(id) = id?;
    state.service.delete_person(id).await?;
    success()
}

/// PUT /api/people/reorder - Persist a drag-and-drop order.
pub async fn reorder_people(
    State(state): State<AppState>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> ApiResult<SuccessResponse> {
    let Json(request) = payload?;
    state.service.reorder_people(&request).await?;
    success()
}
