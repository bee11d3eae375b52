mod mode;
mod player;
mod tier;

pub use mode::{ALL_MODES, GameMode, LeaderboardView};
pub use player::{Placement, Player, PlayerId, TestOutcome};
pub use tier::{RISING_TIERS, TIER_ORDER, Tier};
