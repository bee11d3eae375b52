// Fixtures shared by the unit tests of several modules.

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::directory::{DirectoryEntry, NameDirectory};
use crate::domain::{GameMode, Placement, Player, PlayerId, Tier};

pub const MARLOWWW: &str = "d219c8ee-d32e-4da2-b22e-0aa69d36c88a";
pub const ITZ_REAL_ME: &str = "06ec3577-3299-45fa-bbdf-613b1f86c8ab";
pub const SWIGHT: &str = "ebd7af32-759e-41e2-b227-9eeb8576d609";

pub fn player_id(raw: &str) -> PlayerId {
    PlayerId::parse(raw).unwrap()
}

pub fn ranked_player(raw_id: &str, name: &str, placements: &[(GameMode, Tier)], at: DateTime<Utc>) -> Player {
    placements
        .iter()
        .fold(Player::new(player_id(raw_id), name), |player, (mode, tier)| {
            player.with_placement(*mode, Placement::new(*tier, at))
        })
}

pub fn retired_placement(tier: Tier, at: DateTime<Utc>) -> Placement {
    Placement {
        current: tier,
        peak: None,
        retired: true,
        last_evaluated_at: at,
    }
}

/// Name directory answering from a fixed table
#[derive(Default)]
pub struct ScriptedDirectory {
    entries: HashMap<String, DirectoryEntry>,
    failing: bool,
    calls: AtomicUsize,
}

impl ScriptedDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_entry(mut self, key: &str, id: &str, name: &str) -> Self {
        self.entries.insert(
            key.to_lowercase(),
            DirectoryEntry {
                id: player_id(id),
                name: name.to_string(),
            },
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NameDirectory for ScriptedDirectory {
    async fn lookup_current_name_and_id(&self, stale_name_or_id: &str) -> Result<Option<DirectoryEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            bail!("directory unavailable");
        }
        Ok(self.entries.get(&stale_name_or_id.to_lowercase()).cloned())
    }
}
