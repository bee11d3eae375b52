use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::collections::HashSet;
use std::sync::Arc;

use super::{AppState, PlayerParams, error_response};
use crate::api::models::{ModePlacement, PlacementView, PlayerDetail, PlayerListItem, PlayerListResponse};
use crate::domain::PlayerId;
use crate::ranking;

pub async fn get_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlayerParams>,
) -> impl IntoResponse {
    let players = match state.store.list_players().await {
        Ok(players) => players,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, format!("Store Error: {}", e)).into_response(),
    };

    // ranks stay global while the search narrows the list
    let query = params.search.unwrap_or_default();
    let matching: HashSet<&PlayerId> = ranking::filter_by_search(&players, &query)
        .into_iter()
        .map(|player| &player.id)
        .collect();

    let items: Vec<PlayerListItem> = ranking::rank_all(&players)
        .into_iter()
        .enumerate()
        .filter(|(_, player)| matching.contains(&player.id))
        .map(|(i, player)| PlayerListItem::new(i + 1, player))
        .collect();

    Json(PlayerListResponse {
        total: items.len(),
        items,
    })
    .into_response()
}

pub async fn get_player(State(state): State<Arc<AppState>>, Path(key): Path<String>) -> impl IntoResponse {
    let lookup = match state.resolver.lookup(&key).await {
        Ok(lookup) => lookup,
        Err(e) => return error_response(e),
    };

    let player = &lookup.player;
    let best_tiers = ranking::best_tiers(player, state.config.ranking.spotlight_tiers)
        .into_iter()
        .map(|(mode, placement)| ModePlacement {
            mode,
            placement: Some(PlacementView::from(placement)),
        })
        .collect();
    let modes = ranking::profile_modes(player)
        .into_iter()
        .map(|(mode, placement)| ModePlacement {
            mode,
            placement: placement.map(PlacementView::from),
        })
        .collect();

    Json(PlayerDetail {
        rank: lookup.global_rank,
        id: player.id.to_string(),
        name: player.display_name.clone(),
        total_score: player.total_score(),
        best_tiers,
        modes,
    })
    .into_response()
}
