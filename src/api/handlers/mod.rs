use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::TierError;
use crate::identity::IdentityResolver;
use crate::store::PlayerStore;

pub mod players;
pub mod tiers;

pub struct AppState {
    pub store: Arc<dyn PlayerStore>,
    pub resolver: IdentityResolver,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct PlayerParams {
    pub search: Option<String>,
}

/// Maps engine failures onto HTTP statuses
pub fn error_response(e: TierError) -> Response {
    match e {
        TierError::NotFound(key) => (StatusCode::NOT_FOUND, format!("Player not found: {}", key)).into_response(),
        TierError::InvalidTier(_) | TierError::InvalidTransition(_) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        TierError::ConflictUnresolved { .. } => (StatusCode::CONFLICT, e.to_string()).into_response(),
        TierError::Store(e) => {
            error!("Store failure: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Store Error: {}", e)).into_response()
        }
    }
}
