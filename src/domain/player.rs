use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use super::{GameMode, Tier};
use crate::scoring::compute_total_score;

static PLAYER_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[0-9a-f]{8}-?[0-9a-f]{4}-?[0-9a-f]{4}-?[0-9a-f]{4}-?[0-9a-f]{12}$")
        .expect("player id pattern is valid")
});

/// Unique player identifier in canonical 8-4-4-4-12 lowercase hex form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Parse a 32 digit hex identifier, hyphenated or not, in any case
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if !PLAYER_ID_REGEX.is_match(raw) {
            return None;
        }

        let digits: String = raw
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Some(Self(format!(
            "{}-{}-{}-{}-{}",
            &digits[0..8],
            &digits[8..12],
            &digits[12..16],
            &digits[16..20],
            &digits[20..32]
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One player's standing in one game mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub current: Tier,
    pub peak: Option<Tier>,
    pub retired: bool,
    pub last_evaluated_at: DateTime<Utc>,
}

impl Placement {
    /// A fresh active placement whose peak is its current tier
    pub fn new(current: Tier, at: DateTime<Utc>) -> Self {
        Self {
            current,
            peak: Some(current),
            retired: false,
            last_evaluated_at: at,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.retired
    }

    pub fn is_active_champion(&self) -> bool {
        self.is_active() && self.current == Tier::TOP
    }

    pub fn label(&self) -> String {
        self.current.label(self.retired)
    }
}

/// Result of the evaluation match that ends a retirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    Won,
    Lost,
}

/// Player record. The total score is always derived from the placements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    #[serde(default)]
    pub placements: BTreeMap<GameMode, Placement>,
}

impl Player {
    pub fn new(id: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            placements: BTreeMap::new(),
        }
    }

    pub fn with_placement(mut self, mode: GameMode, placement: Placement) -> Self {
        self.placements.insert(mode, placement);
        self
    }

    pub fn placement(&self, mode: GameMode) -> Option<&Placement> {
        self.placements.get(&mode)
    }

    pub fn total_score(&self) -> u32 {
        compute_total_score(&self.placements)
    }

    pub fn is_active_champion(&self, mode: GameMode) -> bool {
        self.placement(mode)
            .is_some_and(|placement| placement.is_active_champion())
    }
}
