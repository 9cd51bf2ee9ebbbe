//! Request authentication for protected routes.
//!
//! A request moves through: no token → token present → verified → subject
//! resolved → admitted. The first failing step rejects the request and nothing
//! after it runs.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{error, warn};

use super::{
    cookies::AUTH_COOKIE,
    token::{TokenError, TokenKeys},
};
use crate::{
    error::AppError,
    state::AppState,
    store::{User, UserStore},
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing AuthZ cookie")]
    MissingCredential,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("token subject is unknown or deleted")]
    UnknownOrDeletedSubject,
    #[error("could not resolve token subject")]
    Store(anyhow::Error),
}

/// Resolves the session cookie to a live user.
pub async fn authenticate(
    jar: &CookieJar,
    keys: &TokenKeys,
    store: &dyn UserStore,
    now: OffsetDateTime,
) -> Result<User, AuthError> {
    let token = jar
        .get(AUTH_COOKIE)
        .map(|c| c.value())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingCredential)?;

    let user_id = keys.verify(token, now)?;

    store
        .find_user_by_id(user_id)
        .await
        .map_err(AuthError::Store)?
        .ok_or(AuthError::UnknownOrDeletedSubject)
}

/// The live user behind the request's session cookie.
///
/// Taking this extractor makes a handler protected: the handler body only runs
/// once `authenticate` has admitted the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let keys = TokenKeys::from_ref(&state);
        let jar = CookieJar::from_headers(&parts.headers);

        match authenticate(&jar, &keys, state.store.as_ref(), OffsetDateTime::now_utc()).await {
            Ok(user) => Ok(AuthenticatedUser(user)),
            Err(AuthError::Store(e)) => {
                error!(error = %e, "auth gate lookup failed");
                Err(AuthError::Store(e).into())
            }
            Err(e) => {
                warn!(reason = %e, "request rejected");
                Err(e.into())
            }
        }
    }
}
