use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use super::{CommitOutcome, PlacementBatch, PlayerStore};
use crate::domain::{GameMode, Placement, Player, PlayerId};

/// Player store held in process memory
#[derive(Default)]
pub struct MemoryPlayerStore {
    players: Mutex<BTreeMap<PlayerId, Player>>,
    mutations: AtomicUsize,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(players: impl IntoIterator<Item = Player>) -> Self {
        let players = players
            .into_iter()
            .map(|player| (player.id.clone(), player))
            .collect();

        Self {
            players: Mutex::new(players),
            mutations: AtomicUsize::new(0),
        }
    }

    pub async fn insert_player(&self, player: Player) {
        self.players.lock().await.insert(player.id.clone(), player);
        self.record_mutation();
    }

    /// Number of mutating calls that reached the store
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    // --- Helper Methods ---

    fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::SeqCst);
    }

    fn guards_hold(players: &BTreeMap<PlayerId, Player>, batch: &PlacementBatch) -> bool {
        let placements_unchanged = batch.writes.iter().all(|write| {
            let stored = players
                .get(&write.player_id)
                .and_then(|player| player.placement(write.mode));
            stored == write.expected.as_ref()
        });

        let champions_unchanged = batch.champion_guard.as_ref().is_none_or(|guard| {
            let holders = players
                .values()
                .filter(|player| player.is_active_champion(guard.mode))
                .map(|player| player.id.clone())
                .collect();
            guard.matches(holders)
        });

        placements_unchanged && champions_unchanged
    }
}

#[async_trait]
impl PlayerStore for MemoryPlayerStore {
    async fn list_players(&self) -> Result<Vec<Player>> {
        Ok(self.players.lock().await.values().cloned().collect())
    }

    async fn get_player(&self, id: &PlayerId) -> Result<Option<Player>> {
        Ok(self.players.lock().await.get(id).cloned())
    }

    async fn write_placement(&self, id: &PlayerId, mode: GameMode, placement: &Placement) -> Result<()> {
        let mut players = self.players.lock().await;
        let Some(player) = players.get_mut(id) else {
            bail!("No player with id {}", id);
        };
        player.placements.insert(mode, placement.clone());
        self.record_mutation();
        Ok(())
    }

    async fn write_display_name(&self, id: &PlayerId, name: &str) -> Result<()> {
        let mut players = self.players.lock().await;
        let Some(player) = players.get_mut(id) else {
            bail!("No player with id {}", id);
        };
        player.display_name = name.to_string();
        self.record_mutation();
        Ok(())
    }

    async fn commit(&self, batch: &PlacementBatch) -> Result<CommitOutcome> {
        let mut players = self.players.lock().await;

        if batch.writes.iter().any(|write| !players.contains_key(&write.player_id)) {
            bail!("Batch references a player that does not exist");
        }

        if !Self::guards_hold(&players, batch) {
            return Ok(CommitOutcome::Conflict);
        }

        for write in &batch.writes {
            if let Some(player) = players.get_mut(&write.player_id) {
                player.placements.insert(write.mode, write.placement.clone());
            }
        }
        self.record_mutation();

        Ok(CommitOutcome::Committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tier;
    use crate::store::{ChampionGuard, PlacementWrite};
    use chrono::Utc;

    fn id(raw: &str) -> PlayerId {
        PlayerId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_commit_applies_all_writes() {
        let now = Utc::now();
        let a = id("d219c8eed32e4da2b22e0aa69d36c88a");
        let b = id("06ec3577329945fabbdf613b1f86c8ab");
        let store = MemoryPlayerStore::with_players([
            Player::new(a.clone(), "A").with_placement(GameMode::Sword, Placement::new(Tier::HT1, now)),
            Player::new(b.clone(), "B"),
        ]);

        let batch = PlacementBatch {
            writes: vec![
                PlacementWrite {
                    player_id: b.clone(),
                    mode: GameMode::Sword,
                    expected: None,
                    placement: Placement::new(Tier::HT1, now),
                },
                PlacementWrite {
                    player_id: a.clone(),
                    mode: GameMode::Sword,
                    expected: Some(Placement::new(Tier::HT1, now)),
                    placement: Placement::new(Tier::LT1, now),
                },
            ],
            champion_guard: Some(ChampionGuard::new(GameMode::Sword, vec![a.clone()])),
        };

        assert_eq!(store.commit(&batch).await.unwrap(), CommitOutcome::Committed);
        let stored_a = store.get_player(&a).await.unwrap().unwrap();
        let stored_b = store.get_player(&b).await.unwrap().unwrap();
        assert_eq!(stored_a.placement(GameMode::Sword).unwrap().current, Tier::LT1);
        assert_eq!(stored_b.placement(GameMode::Sword).unwrap().current, Tier::HT1);
    }

    #[tokio::test]
    async fn test_commit_detects_stale_guard() {
        let now = Utc::now();
        let a = id("d219c8eed32e4da2b22e0aa69d36c88a");
        let store = MemoryPlayerStore::with_players([
            Player::new(a.clone(), "A").with_placement(GameMode::Sword, Placement::new(Tier::HT1, now)),
        ]);

        let batch = PlacementBatch {
            writes: vec![PlacementWrite {
                player_id: a.clone(),
                mode: GameMode::Sword,
                expected: Some(Placement::new(Tier::LT2, now)),
                placement: Placement::new(Tier::LT1, now),
            }],
            champion_guard: None,
        };

        assert_eq!(store.commit(&batch).await.unwrap(), CommitOutcome::Conflict);
        let stored = store.get_player(&a).await.unwrap().unwrap();
        assert_eq!(stored.placement(GameMode::Sword).unwrap().current, Tier::HT1);
        assert_eq!(store.mutation_count(), 0);
    }
}
