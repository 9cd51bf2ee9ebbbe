use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use serde_json::{json, Value};
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        cookies::{cleared_session_cookie, session_cookie},
        dto::{is_valid_email, parse_dob, LoginRequest, SignupRequest},
        gate::AuthenticatedUser,
        password::{hash_password, verify_password},
        token::TokenKeys,
    },
    error::{AppError, JsonBody},
    state::AppState,
    store::{NewUser, User},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/validate", get(validate))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignupRequest>,
) -> Result<Json<Value>, AppError> {
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::Validation("Invalid email format".into()));
    }

    let Some(dob) = parse_dob(&payload.dob) else {
        warn!(dob = %payload.dob, "invalid date of birth");
        return Err(AppError::Validation("Invalid date of birth format".into()));
    };

    let password_hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        AppError::Internal("Failed to hash password".into())
    })?;

    let user = state
        .store
        .create_user_with_permissions(NewUser {
            email: payload.email,
            password_hash,
            name: payload.name,
            pic: payload.pic,
            intro: payload.intro,
            dob,
            country: payload.country,
            location: payload.location,
        })
        .await
        .map_err(|e| {
            error!(error = %e, "create user failed");
            AppError::CreationFailed("Failed to create user".into())
        })?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Json(json!({})))
}

/// Every credential failure yields the same response so accounts cannot be probed.
#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let user = match state.store.find_user_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, "find_user_by_email failed");
            return Err(AppError::InvalidCredentials);
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            warn!(user_id = user.id, "login invalid password");
            return Err(AppError::InvalidCredentials);
        }
        Err(e) => {
            error!(error = %e, user_id = user.id, "verify_password failed");
            return Err(AppError::InvalidCredentials);
        }
    }

    let keys = TokenKeys::from_ref(&state);
    let token = keys.issue(user.id, OffsetDateTime::now_utc()).map_err(|e| {
        error!(error = %e, "token issue failed");
        AppError::Internal("Failed to create token".into())
    })?;

    info!(user_id = user.id, "user logged in");
    Ok((jar.add(session_cookie(token)), Json(json!({}))))
}

#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    (
        jar.add(cleared_session_cookie()),
        Json(json!({ "message": "Logged out successfully" })),
    )
}

#[instrument(skip_all)]
pub async fn validate(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
