use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use rusqlite::{Connection, TransactionBehavior};
use std::collections::HashMap;

use super::{CommitOutcome, PlacementBatch, PlayerStore};
use crate::database::{self, DbPool, PlacementRow, PlayerRow};
use crate::domain::{GameMode, Placement, Player, PlayerId, Tier};
use crate::errors::store_context;

/// Player store on top of the sqlite `players` / `placements` tables
pub struct SqlitePlayerStore {
    pool: DbPool,
}

impl SqlitePlayerStore {
    pub fn open(database_path: &str) -> Result<Self> {
        let pool = database::create_pool(database_path)?;
        Self::from_pool(pool)
    }

    pub fn in_memory() -> Result<Self> {
        let pool = database::create_memory_pool()?;
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: DbPool) -> Result<Self> {
        let conn = database::get_connection(&pool)?;
        database::setup::initialize_schema(&conn)?;
        drop(conn);
        Ok(Self { pool })
    }

    /// Adds a player with no placements. Returns false when the id already exists.
    pub fn register_player(&self, id: &PlayerId, display_name: &str) -> Result<bool> {
        let conn = database::get_connection(&self.pool)?;
        database::players::insert_player(&conn, id.as_str(), display_name)
            .with_context(|| store_context("register player", id.as_str()))
    }

    // --- Helper Methods ---

    fn load_player(conn: &Connection, row: PlayerRow) -> Result<Player> {
        let placements = database::placements::list_for_player(conn, &row.id)?;
        build_player(row, placements)
    }

    fn ensure_player_exists(conn: &Connection, id: &PlayerId) -> Result<()> {
        if database::players::find_by_id(conn, id.as_str())?.is_none() {
            bail!("No player with id {}", id);
        }
        Ok(())
    }

    fn guards_hold(conn: &Connection, batch: &PlacementBatch) -> Result<bool> {
        for write in &batch.writes {
            let stored = database::placements::find(conn, write.player_id.as_str(), write.mode.name())?
                .map(placement_from_row)
                .transpose()?
                .map(|(_, placement)| placement);

            if stored != write.expected {
                return Ok(false);
            }
        }

        if let Some(guard) = &batch.champion_guard {
            let holders = database::placements::list_active_holders(conn, guard.mode.name(), Tier::TOP.code())?
                .iter()
                .map(|raw| parse_player_id(raw))
                .collect::<Result<Vec<_>>>()?;

            if !guard.matches(holders) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[async_trait]
impl PlayerStore for SqlitePlayerStore {
    async fn list_players(&self) -> Result<Vec<Player>> {
        let conn = database::get_connection(&self.pool)?;
        let player_rows = database::players::list_all(&conn)?;

        let mut placements_by_player: HashMap<String, Vec<PlacementRow>> = HashMap::new();
        for row in database::placements::list_all(&conn)? {
            placements_by_player.entry(row.player_id.clone()).or_default().push(row);
        }

        player_rows
            .into_iter()
            .map(|row| {
                let placements = placements_by_player.remove(&row.id).unwrap_or_default();
                build_player(row, placements)
            })
            .collect()
    }

    async fn get_player(&self, id: &PlayerId) -> Result<Option<Player>> {
        let conn = database::get_connection(&self.pool)?;
        database::players::find_by_id(&conn, id.as_str())?
            .map(|row| Self::load_player(&conn, row))
            .transpose()
    }

    async fn write_placement(&self, id: &PlayerId, mode: GameMode, placement: &Placement) -> Result<()> {
        let conn = database::get_connection(&self.pool)?;
        Self::ensure_player_exists(&conn, id)?;
        database::placements::upsert_placement(&conn, &placement_to_row(id, mode, placement))
            .with_context(|| store_context("write placement", id.as_str()))
    }

    async fn write_display_name(&self, id: &PlayerId, name: &str) -> Result<()> {
        let conn = database::get_connection(&self.pool)?;
        let updated = database::players::update_display_name(&conn, id.as_str(), name)?;
        if updated == 0 {
            bail!("No player with id {}", id);
        }
        Ok(())
    }

    async fn commit(&self, batch: &PlacementBatch) -> Result<CommitOutcome> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to begin placement transaction")?;

        for write in &batch.writes {
            Self::ensure_player_exists(&tx, &write.player_id)?;
        }

        if !Self::guards_hold(&tx, batch)? {
            return Ok(CommitOutcome::Conflict);
        }

        for write in &batch.writes {
            let row = placement_to_row(&write.player_id, write.mode, &write.placement);
            database::placements::upsert_placement(&tx, &row)?;
        }

        tx.commit().context("Failed to commit placement transaction")?;
        Ok(CommitOutcome::Committed)
    }
}

fn build_player(row: PlayerRow, placement_rows: Vec<PlacementRow>) -> Result<Player> {
    let mut player = Player::new(parse_player_id(&row.id)?, row.display_name);
    for placement_row in placement_rows {
        let (mode, placement) = placement_from_row(placement_row)?;
        player.placements.insert(mode, placement);
    }
    Ok(player)
}

fn parse_player_id(raw: &str) -> Result<PlayerId> {
    PlayerId::parse(raw).ok_or_else(|| anyhow!("Stored player id is malformed: {}", raw))
}

fn placement_from_row(row: PlacementRow) -> Result<(GameMode, Placement)> {
    let mode: GameMode = row
        .mode
        .parse()
        .with_context(|| format!("Stored placement for {} has an unknown mode", row.player_id))?;
    let current: Tier = row.current_tier.parse()?;
    let peak = row.peak_tier.as_deref().map(str::parse::<Tier>).transpose()?;

    Ok((
        mode,
        Placement {
            current,
            peak,
            retired: row.retired,
            last_evaluated_at: row.last_evaluated_at,
        },
    ))
}

fn placement_to_row(id: &PlayerId, mode: GameMode, placement: &Placement) -> PlacementRow {
    PlacementRow {
        player_id: id.as_str().to_string(),
        mode: mode.name().to_string(),
        current_tier: placement.current.code().to_string(),
        peak_tier: placement.peak.map(|tier| tier.code().to_string()),
        retired: placement.retired,
        last_evaluated_at: placement.last_evaluated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ChampionGuard, PlacementWrite};
    use chrono::Utc;

    fn id(raw: &str) -> PlayerId {
        PlayerId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_round_trips_players_and_placements() {
        let store = SqlitePlayerStore::in_memory().unwrap();
        let a = id("d219c8ee-d32e-4da2-b22e-0aa69d36c88a");
        assert!(store.register_player(&a, "Marlowww").unwrap());
        assert!(!store.register_player(&a, "Marlowww").unwrap());

        let placement = Placement::new(Tier::LT2, Utc::now());
        store.write_placement(&a, GameMode::DiamondSmp, &placement).await.unwrap();

        let loaded = store.get_player(&a).await.unwrap().unwrap();
        assert_eq!(loaded.display_name, "Marlowww");
        assert_eq!(loaded.placement(GameMode::DiamondSmp), Some(&placement));
        assert_eq!(loaded.total_score(), 20);

        let all = store.list_players().await.unwrap();
        assert_eq!(all, vec![loaded]);
    }

    #[tokio::test]
    async fn test_write_display_name_requires_player() {
        let store = SqlitePlayerStore::in_memory().unwrap();
        let missing = id("06ec3577329945fabbdf613b1f86c8ab");
        assert!(store.write_display_name(&missing, "ghost").await.is_err());
        assert!(store.get_player(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_commit_rejects_when_champions_changed() {
        let store = SqlitePlayerStore::in_memory().unwrap();
        let a = id("d219c8eed32e4da2b22e0aa69d36c88a");
        let b = id("06ec3577329945fabbdf613b1f86c8ab");
        store.register_player(&a, "A").unwrap();
        store.register_player(&b, "B").unwrap();

        let now = Utc::now();
        store.write_placement(&a, GameMode::Sword, &Placement::new(Tier::HT1, now)).await.unwrap();

        // B believes nobody holds HT1 yet
        let batch = PlacementBatch {
            writes: vec![PlacementWrite {
                player_id: b.clone(),
                mode: GameMode::Sword,
                expected: None,
                placement: Placement::new(Tier::HT1, now),
            }],
            champion_guard: Some(ChampionGuard::new(GameMode::Sword, vec![])),
        };

        assert_eq!(store.commit(&batch).await.unwrap(), CommitOutcome::Conflict);
        let stored_b = store.get_player(&b).await.unwrap().unwrap();
        assert!(stored_b.placement(GameMode::Sword).is_none());

        let fixed = PlacementBatch {
            champion_guard: Some(ChampionGuard::new(GameMode::Sword, vec![a.clone()])),
            ..batch
        };
        assert_eq!(store.commit(&fixed).await.unwrap(), CommitOutcome::Committed);
    }
}
