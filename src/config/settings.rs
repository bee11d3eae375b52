use crate::champion::ChampionPolicy;

const DATABASE_PATH_VAR: &str = "DATABASE_PATH";
const DEFAULT_DATABASE_PATH: &str = "tier_rankings.db";

#[derive(Debug, Clone)]
pub struct RankingSettings {
    pub champion_policy: ChampionPolicy,
    /// Placements shown in a player's spotlight
    pub spotlight_tiers: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            champion_policy: ChampionPolicy::AutoDemote,
            spotlight_tiers: 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolverSettings {
    /// Ask the directory for the current name after an id hit
    pub sync_names_on_id_hit: bool,
}

#[derive(Debug, Clone)]
pub struct DirectorySettings {
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub name_lookup_url: &'static str,
    pub profile_url: &'static str,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 250, // 4 req/sec
            user_agent: "TierRankings/1.0",
            timeout_secs: 10,
            name_lookup_url: "https://api.ashcon.app/mojang/v2/user",
            profile_url: "https://sessionserver.mojang.com/session/minecraft/profile",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ranking: RankingSettings,
    pub resolver: ResolverSettings,
    pub directory: DirectorySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            ranking: RankingSettings::default(),
            resolver: ResolverSettings::default(),
            directory: DirectorySettings::default(),
        }
    }

    /// `DATABASE_PATH` from the environment, or the default file
    pub fn database_path() -> String {
        std::env::var(DATABASE_PATH_VAR).unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string())
    }
}
