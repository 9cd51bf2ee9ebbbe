use crate::state::AppState;
use axum::Router;

mod claims;
pub mod cookies;
mod dto;
pub mod gate;
pub mod handlers;
mod password;
pub mod token;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
