use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use super::token::TOKEN_TTL;

/// Cookie carrying the session token.
pub const AUTH_COOKIE: &str = "AuthZ";

/// HttpOnly, SameSite=Lax session cookie living as long as the token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(TOKEN_TTL)
        .build()
}

/// Expired, empty session cookie that makes the browser drop it.
pub fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, String::new()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
