use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TierError;

/// Game modes that carry their own tier placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "UHC")]
    Uhc,
    Sword,
    Speed,
    Pot,
    #[serde(rename = "NethOP")]
    NethOp,
    #[serde(rename = "SMP")]
    Smp,
    #[serde(rename = "Diamond SMP")]
    DiamondSmp,
    Vanilla,
}

pub const ALL_MODES: [GameMode; 8] = [
    GameMode::Uhc,
    GameMode::Sword,
    GameMode::Speed,
    GameMode::Pot,
    GameMode::NethOp,
    GameMode::Smp,
    GameMode::DiamondSmp,
    GameMode::Vanilla,
];

const OVERALL: &str = "Overall";

impl GameMode {
    pub fn name(self) -> &'static str {
        match self {
            GameMode::Uhc => "UHC",
            GameMode::Sword => "Sword",
            GameMode::Speed => "Speed",
            GameMode::Pot => "Pot",
            GameMode::NethOp => "NethOP",
            GameMode::Smp => "SMP",
            GameMode::DiamondSmp => "Diamond SMP",
            GameMode::Vanilla => "Vanilla",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameMode {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_mode_name(s);
        if wanted.eq_ignore_ascii_case(OVERALL) {
            return Err(TierError::invalid_transition(
                "Overall is an aggregate view and holds no placement",
            ));
        }

        ALL_MODES
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| TierError::invalid_transition(format!("unknown game mode: {}", s)))
    }
}

/// A leaderboard perspective: the aggregate view or one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderboardView {
    Overall,
    Mode(GameMode),
}

impl fmt::Display for LeaderboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardView::Overall => f.write_str(OVERALL),
            LeaderboardView::Mode(mode) => mode.fmt(f),
        }
    }
}

impl FromStr for LeaderboardView {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalize_mode_name(s).eq_ignore_ascii_case(OVERALL) {
            return Ok(LeaderboardView::Overall);
        }
        s.parse().map(LeaderboardView::Mode)
    }
}

fn normalize_mode_name(raw: &str) -> String {
    raw.trim().replace(['-', '_'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_slugs_and_case() {
        assert_eq!("diamond-smp".parse::<GameMode>().unwrap(), GameMode::DiamondSmp);
        assert_eq!("Diamond SMP".parse::<GameMode>().unwrap(), GameMode::DiamondSmp);
        assert_eq!("nethop".parse::<GameMode>().unwrap(), GameMode::NethOp);
    }

    #[test]
    fn test_overall_is_not_a_placement_mode() {
        assert!(matches!(
            "Overall".parse::<GameMode>(),
            Err(TierError::InvalidTransition(_))
        ));
        assert_eq!(
            "overall".parse::<LeaderboardView>().unwrap(),
            LeaderboardView::Overall
        );
        assert_eq!(
            "Sword".parse::<LeaderboardView>().unwrap(),
            LeaderboardView::Mode(GameMode::Sword)
        );
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&GameMode::DiamondSmp).unwrap();
        assert_eq!(json, "\"Diamond SMP\"");
        let mode: GameMode = serde_json::from_str("\"NethOP\"").unwrap();
        assert_eq!(mode, GameMode::NethOp);
    }
}
