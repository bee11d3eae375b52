use axum::{Router, routing::get};
use std::sync::Arc;

use crate::api::handlers::{
    AppState,
    players::{get_player, get_players},
    tiers::{get_rising, get_tier_groups},
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(get_players))
        .route("/api/player/:key", get(get_player))
        .route("/api/tiers/:view", get(get_tier_groups))
        .route("/api/tiers/:view/rising", get(get_rising))
        .with_state(state)
}
