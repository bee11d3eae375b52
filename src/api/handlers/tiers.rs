use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, error_response};
use crate::api::models::{PlayerSummary, RisingResponse, TierGroup, TierGroupsResponse};
use crate::domain::{GameMode, LeaderboardView};
use crate::ranking;

pub async fn get_tier_groups(State(state): State<Arc<AppState>>, Path(view): Path<String>) -> impl IntoResponse {
    let view: LeaderboardView = match view.parse() {
        Ok(view) => view,
        Err(e) => return error_response(e),
    };

    let players = match state.store.list_players().await {
        Ok(players) => players,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Store Error: {}", e)).into_response(),
    };

    let groups = ranking::group_by_tier(&players, view)
        .into_iter()
        .map(|(tier, members)| TierGroup {
            tier,
            points: tier.points(),
            players: members.into_iter().map(PlayerSummary::from).collect(),
        })
        .collect();

    Json(TierGroupsResponse {
        view: view.to_string(),
        spotlight: ranking::spotlight(&players, view).map(PlayerSummary::from),
        groups,
    })
    .into_response()
}

pub async fn get_rising(State(state): State<Arc<AppState>>, Path(view): Path<String>) -> impl IntoResponse {
    let mode: GameMode = match view.parse() {
        Ok(mode) => mode,
        Err(e) => return error_response(e),
    };

    let players = match state.store.list_players().await {
        Ok(players) => players,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Store Error: {}", e)).into_response(),
    };

    Json(RisingResponse {
        mode,
        players: ranking::rising_ranks(&players, mode)
            .into_iter()
            .map(PlayerSummary::from)
            .collect(),
    })
    .into_response()
}
