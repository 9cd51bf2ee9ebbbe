use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use super::{
    cache::Page,
    dto::{
        DeleteUserRequest, SearchRequest, UpdateCountryAndLocationRequest, UsersInLocationRequest,
    },
    search::rank_by_similarity,
};
use crate::{
    error::{store_failure, AppError, JsonBody},
    state::AppState,
    store::User,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/update-country-and-location", post(update_country_and_location))
        .route("/get-users-in-location", get(get_users_in_location))
        .route("/delete-user", delete(delete_user))
        .route("/search-users", get(search_users))
}

#[instrument(skip(state))]
pub async fn update_country_and_location(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UpdateCountryAndLocationRequest>,
) -> Result<Json<User>, AppError> {
    let user = state
        .store
        .update_country_and_location(payload.user_id, &payload.country, &payload.location)
        .await
        .map_err(store_failure("Failed to update user information"))?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    info!(user_id = user.id, "country and location updated");
    Ok(Json(user))
}

/// Pages are served from the location cache when present, otherwise fetched and cached.
#[instrument(skip(state))]
pub async fn get_users_in_location(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UsersInLocationRequest>,
) -> Result<Json<Vec<User>>, AppError> {
    let page = Page::new(payload.page);

    if let Some(cached) = state.location_cache.get(&payload.location, page) {
        debug!(location = %payload.location, page = page.number(), "location cache hit");
        return Ok(Json(cached));
    }

    let users = state
        .store
        .list_users_in_location(&payload.location, page.limit(), page.offset())
        .await
        .map_err(store_failure("Failed to fetch users"))?;

    Ok(Json(state.location_cache.put(&payload.location, page, users)))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DeleteUserRequest>,
) -> Result<Json<Value>, AppError> {
    let deleted = state
        .store
        .soft_delete_user(&payload.email)
        .await
        .map_err(store_failure("Failed to delete user"))?;

    info!(email = %payload.email, deleted, "user deletion processed");
    Ok(Json(json!({ "message": "User and permissions deleted successfully" })))
}

#[instrument(skip(state))]
pub async fn search_users(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SearchRequest>,
) -> Result<Json<Vec<User>>, AppError> {
    let candidates = state
        .store
        .search_candidates(payload.location_filter())
        .await
        .map_err(store_failure("Failed to fetch users"))?;

    Ok(Json(rank_by_similarity(&payload.query, candidates, |u| {
        u.name.as_str()
    })))
}
