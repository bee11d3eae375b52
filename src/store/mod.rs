mod memory;
mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{GameMode, Placement, Player, PlayerId};

pub use memory::MemoryPlayerStore;
pub use sqlite::SqlitePlayerStore;

/// A placement to write together with the value the writer read.
/// `expected: None` means the writer saw no placement for that mode.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementWrite {
    pub player_id: PlayerId,
    pub mode: GameMode,
    pub expected: Option<Placement>,
    pub placement: Placement,
}

/// The active HT1 holders of a mode as observed by the writer
#[derive(Debug, Clone, PartialEq)]
pub struct ChampionGuard {
    pub mode: GameMode,
    pub holders: Vec<PlayerId>,
}

impl ChampionGuard {
    pub fn new(mode: GameMode, mut holders: Vec<PlayerId>) -> Self {
        holders.sort();
        holders.dedup();
        Self { mode, holders }
    }

    /// Compares against the holders found at commit time, in any order
    pub fn matches(&self, mut found: Vec<PlayerId>) -> bool {
        found.sort();
        found.dedup();
        found == self.holders
    }
}

/// Writes applied all together or not at all
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementBatch {
    pub writes: Vec<PlacementWrite>,
    pub champion_guard: Option<ChampionGuard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// A guard no longer held; nothing was written
    Conflict,
}

/// Storage of player records, owned outside the ranking engine
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn list_players(&self) -> Result<Vec<Player>>;

    async fn get_player(&self, id: &PlayerId) -> Result<Option<Player>>;

    async fn write_placement(&self, id: &PlayerId, mode: GameMode, placement: &Placement) -> Result<()>;

    async fn write_display_name(&self, id: &PlayerId, name: &str) -> Result<()>;

    /// Atomic conditional write used by the champion invariant
    async fn commit(&self, batch: &PlacementBatch) -> Result<CommitOutcome>;
}
