use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{GameMode, Placement, Player, Tier};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementView {
    pub tier: Tier,
    pub label: String,
    pub peak: Option<Tier>,
    pub retired: bool,
    pub points: u32,
    pub last_evaluated_at: DateTime<Utc>,
}

impl From<&Placement> for PlacementView {
    fn from(placement: &Placement) -> Self {
        Self {
            tier: placement.current,
            label: placement.label(),
            peak: placement.peak,
            retired: placement.retired,
            points: placement.current.points(),
            last_evaluated_at: placement.last_evaluated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListItem {
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub total_score: u32,
    pub placements: BTreeMap<GameMode, PlacementView>,
}

impl PlayerListItem {
    pub fn new(rank: usize, player: &Player) -> Self {
        Self {
            rank,
            id: player.id.to_string(),
            name: player.display_name.clone(),
            total_score: player.total_score(),
            placements: player
                .placements
                .iter()
                .map(|(mode, placement)| (*mode, PlacementView::from(placement)))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListResponse {
    pub items: Vec<PlayerListItem>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModePlacement {
    pub mode: GameMode,
    pub placement: Option<PlacementView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetail {
    pub rank: Option<usize>,
    pub id: String,
    pub name: String,
    pub total_score: u32,
    pub best_tiers: Vec<ModePlacement>,
    pub modes: Vec<ModePlacement>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub id: String,
    pub name: String,
    pub total_score: u32,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.to_string(),
            name: player.display_name.clone(),
            total_score: player.total_score(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierGroup {
    pub tier: Tier,
    pub points: u32,
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierGroupsResponse {
    pub view: String,
    pub spotlight: Option<PlayerSummary>,
    pub groups: Vec<TierGroup>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RisingResponse {
    pub mode: GameMode,
    pub players: Vec<PlayerSummary>,
}
