use anyhow::Context;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::champion::{self, Demotion};
use crate::config::RankingSettings;
use crate::domain::{ALL_MODES, GameMode, Placement, Player, PlayerId};
use crate::errors::{TierError, TierResult, store_context};
use crate::store::{CommitOutcome, PlacementBatch, PlayerStore};
use crate::transitions::{self, TierChange};

/// The player after a change, plus anyone demoted off HT1 by it
#[derive(Debug, Clone)]
pub struct TierUpdate {
    pub player: Player,
    pub demotions: Vec<Demotion>,
}

pub struct TierService {
    store: Arc<dyn PlayerStore>,
    settings: RankingSettings,
}

impl TierService {
    pub fn new(store: Arc<dyn PlayerStore>, settings: RankingSettings) -> Self {
        Self { store, settings }
    }

    pub async fn apply(
        &self,
        id: &PlayerId,
        mode: GameMode,
        change: TierChange,
        at: DateTime<Utc>,
    ) -> TierResult<TierUpdate> {
        let mut player = self
            .store
            .get_player(id)
            .await
            .with_context(|| store_context("get_player", id.as_str()))?
            .ok_or_else(|| TierError::NotFound(id.to_string()))?;

        let updated = transitions::apply_change(player.placement(mode), change, at)?;
        info!("{} {}: {} -> {}", player.display_name, mode, Self::describe(player.placement(mode)), updated.label());

        let demotions = if updated.is_active_champion() {
            self.commit_champion(&player, mode, updated.clone(), at).await?
        } else {
            self.store
                .write_placement(id, mode, &updated)
                .await
                .with_context(|| store_context("write_placement", id.as_str()))?;
            Vec::new()
        };

        player.placements.insert(mode, updated);
        Ok(TierUpdate { player, demotions })
    }

    /// Demotes extra HT1 holders in every mode. Returns what was demoted.
    pub async fn reconcile_champions(&self, at: DateTime<Utc>) -> TierResult<Vec<Demotion>> {
        let players = self
            .store
            .list_players()
            .await
            .with_context(|| store_context("list_players", "*"))?;

        let mut demoted = Vec::new();
        for mode in ALL_MODES {
            let Some((batch, demotions)) = champion::plan_reconciliation(&players, mode, at)? else {
                continue;
            };
            self.commit_batch(&batch, mode).await?;
            demoted.extend(demotions);
        }

        info!("Reconciliation demoted {} players", demoted.len());
        Ok(demoted)
    }

    // --- Helper Methods ---

    async fn commit_champion(
        &self,
        target: &Player,
        mode: GameMode,
        updated: Placement,
        at: DateTime<Utc>,
    ) -> TierResult<Vec<Demotion>> {
        let players = self
            .store
            .list_players()
            .await
            .with_context(|| store_context("list_players", "*"))?;

        let (batch, demotions) =
            champion::plan_write(&players, target, mode, updated, self.settings.champion_policy, at)?;
        self.commit_batch(&batch, mode).await?;

        for demotion in &demotions {
            info!("{} demoted to LT1 in {}", demotion.display_name, mode);
        }
        Ok(demotions)
    }

    async fn commit_batch(&self, batch: &PlacementBatch, mode: GameMode) -> TierResult<()> {
        let outcome = self
            .store
            .commit(batch)
            .await
            .with_context(|| store_context("commit", mode.name()))?;

        match outcome {
            CommitOutcome::Committed => Ok(()),
            CommitOutcome::Conflict => {
                warn!("Concurrent write to {} HT1 holders, nothing committed", mode);
                Err(TierError::ConflictUnresolved { mode })
            }
        }
    }

    fn describe(placement: Option<&Placement>) -> String {
        placement.map(Placement::label).unwrap_or_else(|| "unranked".to_string())
    }
}
