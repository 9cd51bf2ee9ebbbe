pub mod cache;
mod dto;
pub mod handlers;
pub mod search;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
