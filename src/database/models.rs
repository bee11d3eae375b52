use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct PlayerRow {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub struct PlacementRow {
    pub player_id: String,
    pub mode: String,
    pub current_tier: String,
    pub peak_tier: Option<String>,
    pub retired: bool,
    pub last_evaluated_at: DateTime<Utc>,
}
