use log::{debug, info, warn};
use std::sync::Arc;

use crate::config::ResolverSettings;
use crate::directory::{DirectoryEntry, NameDirectory};
use crate::domain::{Player, PlayerId};
use crate::errors::{TierError, TierResult};
use crate::ranking;
use crate::store::PlayerStore;

/// A resolved player with their position on the global board
#[derive(Debug, Clone)]
pub struct PlayerLookup {
    pub player: Player,
    pub global_rank: Option<usize>,
}

/// Turns an id or a display name into a stored player.
///
/// Steps, first hit wins:
/// 1. id lookup, when the key has the id format
/// 2. case-insensitive exact display name match
/// 3. directory translation of a renamed player, then id lookup, then a
///    display name write back so the store catches up
///
/// A failing store or directory call is treated as a miss for that step.
pub struct IdentityResolver {
    store: Arc<dyn PlayerStore>,
    directory: Arc<dyn NameDirectory>,
    settings: ResolverSettings,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn PlayerStore>, directory: Arc<dyn NameDirectory>, settings: ResolverSettings) -> Self {
        Self {
            store,
            directory,
            settings,
        }
    }

    pub async fn resolve(&self, key: &str) -> TierResult<Player> {
        let key = key.trim();
        if key.is_empty() {
            return Err(TierError::NotFound(key.to_string()));
        }

        if let Some(id) = PlayerId::parse(key)
            && let Some(player) = self.find_by_id(&id).await
        {
            debug!("Resolved {} by id", key);
            return Ok(self.refresh_name(player).await);
        }

        if let Some(player) = self.find_by_name(key).await {
            debug!("Resolved {} by display name", key);
            return Ok(player);
        }

        if let Some(player) = self.find_via_directory(key).await {
            return Ok(player);
        }

        Err(TierError::NotFound(key.to_string()))
    }

    /// [`Self::resolve`] plus the player's global rank
    pub async fn lookup(&self, key: &str) -> TierResult<PlayerLookup> {
        let player = self.resolve(key).await?;
        let players = self.store.list_players().await?;
        let global_rank = ranking::global_rank(&players, &player.id);

        Ok(PlayerLookup { player, global_rank })
    }

    // --- Helper Methods ---

    async fn find_by_id(&self, id: &PlayerId) -> Option<Player> {
        match self.store.get_player(id).await {
            Ok(player) => player,
            Err(e) => {
                warn!("Player store lookup for {} failed: {:?}", id, e);
                None
            }
        }
    }

    async fn find_by_name(&self, name: &str) -> Option<Player> {
        let players = match self.store.list_players().await {
            Ok(players) => players,
            Err(e) => {
                warn!("Player store listing failed: {:?}", e);
                return None;
            }
        };

        let wanted = name.to_lowercase();
        players
            .into_iter()
            .find(|player| player.display_name.to_lowercase() == wanted)
    }

    async fn ask_directory(&self, stale_name_or_id: &str) -> Option<DirectoryEntry> {
        match self.directory.lookup_current_name_and_id(stale_name_or_id).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Name directory lookup for {} failed: {:?}", stale_name_or_id, e);
                None
            }
        }
    }

    async fn find_via_directory(&self, key: &str) -> Option<Player> {
        let entry = self.ask_directory(key).await?;
        let player = self.find_by_id(&entry.id).await?;
        info!("{} resolved through the directory as {}", key, entry.name);
        Some(self.reconcile_name(player, &entry.name).await)
    }

    async fn refresh_name(&self, player: Player) -> Player {
        if !self.settings.sync_names_on_id_hit {
            return player;
        }

        match self.ask_directory(player.id.as_str()).await {
            Some(entry) if entry.id == player.id => self.reconcile_name(player, &entry.name).await,
            _ => player,
        }
    }

    async fn reconcile_name(&self, mut player: Player, canonical_name: &str) -> Player {
        if player.display_name == canonical_name {
            return player;
        }

        info!("Renaming {} from {} to {}", player.id, player.display_name, canonical_name);
        if let Err(e) = self.store.write_display_name(&player.id, canonical_name).await {
            warn!("Failed to store new display name for {}: {:?}", player.id, e);
        }
        player.display_name = canonical_name.to_string();
        player
    }
}
