use axum::{
    extract::State,
    routing::{get, post, MethodRouter},
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{AlterPermissionsRequest, CheckPermissionsRequest},
    PermissionFlag,
};
use crate::{
    error::{store_failure, AppError, JsonBody},
    state::AppState,
    store::UserPermissions,
};

pub fn permission_routes() -> Router<AppState> {
    Router::new()
        .route("/alter-user-deactivation", alter_route(PermissionFlag::Deactivation))
        .route("/alter-commenting-permissions", alter_route(PermissionFlag::Commenting))
        .route("/alter-posting-permissions", alter_route(PermissionFlag::Posting))
        .route("/alter-analytix-permissions", alter_route(PermissionFlag::Analytics))
        .route("/check-user-permissions", get(check_user_permissions))
}

fn alter_route(flag: PermissionFlag) -> MethodRouter<AppState> {
    post(
        move |state: State<AppState>, body: JsonBody<AlterPermissionsRequest>| {
            alter_permission(state, body, flag)
        },
    )
}

#[instrument(skip(state))]
pub async fn check_user_permissions(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CheckPermissionsRequest>,
) -> Result<Json<UserPermissions>, AppError> {
    state
        .store
        .find_permissions(&payload.email)
        .await
        .map_err(store_failure("Failed to read user permissions"))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User permissions not found".into()))
}

/// Sets the single flag bound to the route from the matching request field.
#[instrument(skip(state))]
pub async fn alter_permission(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AlterPermissionsRequest>,
    flag: PermissionFlag,
) -> Result<Json<UserPermissions>, AppError> {
    let perms = state
        .store
        .set_permission_flag(&payload.email, flag, flag.requested(&payload))
        .await
        .map_err(store_failure("Failed to update user permissions"))?
        .ok_or_else(|| AppError::NotFound("User permissions not found".into()))?;

    info!(email = %perms.email, ?flag, value = flag.get(&perms), "permission updated");
    Ok(Json(perms))
}
