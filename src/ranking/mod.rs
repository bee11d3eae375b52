mod leaderboard;
mod profile;

pub use leaderboard::{
    filter_by_search, global_rank, group_by_tier, overall_tier, rank_all, rising_ranks, spotlight,
};
pub use profile::{best_tiers, profile_modes};
