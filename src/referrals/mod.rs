pub mod handlers;
pub mod rank;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::referral_routes()
}
