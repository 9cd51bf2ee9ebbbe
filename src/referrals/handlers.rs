use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::rank::ReferralRank;
use crate::{
    error::{store_failure, AppError, JsonBody},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ReferralRequest {
    pub user_id: i64,
}

pub fn referral_routes() -> Router<AppState> {
    Router::new()
        .route("/add-referral-to-user", post(add_referral_to_user))
        .route("/determine-referral-rank", get(determine_referral_rank))
}

#[instrument(skip(state))]
pub async fn add_referral_to_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ReferralRequest>,
) -> Result<Json<Value>, AppError> {
    let user = state
        .store
        .increment_referrals(payload.user_id)
        .await
        .map_err(store_failure("Failed to update referral count"))?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    info!(user_id = user.id, referrals = user.ref_rank, "referral added");
    Ok(Json(json!({
        "message": "Referral added to user successfully",
        "user": user,
    })))
}

#[instrument(skip(state))]
pub async fn determine_referral_rank(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ReferralRequest>,
) -> Result<Json<Value>, AppError> {
    let user = state
        .store
        .find_user_by_id(payload.user_id)
        .await
        .map_err(store_failure("Failed to read user"))?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let rank = ReferralRank::from_referrals(user.ref_rank);
    Ok(Json(json!({
        "message": "Referral rank determined successfully",
        "rank": rank.label(),
    })))
}
