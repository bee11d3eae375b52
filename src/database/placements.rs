use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use super::models::PlacementRow;

const SELECT_COLUMNS: &str =
    "SELECT player_id, mode, current_tier, peak_tier, retired, last_evaluated_at FROM placements";

pub fn upsert_placement(conn: &Connection, row: &PlacementRow) -> Result<()> {
    let sql = "INSERT INTO placements (player_id, mode, current_tier, peak_tier, retired, last_evaluated_at) \
               VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
               ON CONFLICT(player_id, mode) DO UPDATE SET \
               current_tier = excluded.current_tier, \
               peak_tier = excluded.peak_tier, \
               retired = excluded.retired, \
               last_evaluated_at = excluded.last_evaluated_at";

    conn.execute(
        sql,
        params![
            row.player_id,
            row.mode,
            row.current_tier,
            row.peak_tier,
            row.retired,
            row.last_evaluated_at
        ],
    )
    .context("Failed to upsert placement")
    .map(|_| ())
}

pub fn find(conn: &Connection, player_id: &str, mode: &str) -> Result<Option<PlacementRow>> {
    let sql = format!("{} WHERE player_id = ?1 AND mode = ?2", SELECT_COLUMNS);

    conn.query_row(&sql, params![player_id, mode], parse_placement_row)
        .optional()
        .context("Failed to query placement")
}

pub fn list_for_player(conn: &Connection, player_id: &str) -> Result<Vec<PlacementRow>> {
    let sql = format!("{} WHERE player_id = ?1", SELECT_COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id], parse_placement_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_all(conn: &Connection) -> Result<Vec<PlacementRow>> {
    let mut stmt = conn.prepare(SELECT_COLUMNS)?;
    let rows = stmt
        .query_map([], parse_placement_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Ids of players holding `tier` unretired in `mode`
pub fn list_active_holders(conn: &Connection, mode: &str, tier: &str) -> Result<Vec<String>> {
    let sql = "SELECT player_id FROM placements WHERE mode = ?1 AND current_tier = ?2 AND retired = 0";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![mode, tier], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    Ok(rows)
}

fn parse_placement_row(row: &rusqlite::Row) -> rusqlite::Result<PlacementRow> {
    Ok(PlacementRow {
        player_id: row.get(0)?,
        mode: row.get(1)?,
        current_tier: row.get(2)?,
        peak_tier: row.get(3)?,
        retired: row.get(4)?,
        last_evaluated_at: row.get(5)?,
    })
}
