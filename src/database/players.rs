use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use super::models::PlayerRow;

/// Inserts a player unless the id is already taken. Returns whether a row was added.
pub fn insert_player(conn: &Connection, id: &str, display_name: &str) -> Result<bool> {
    let sql = "INSERT INTO players (id, display_name) VALUES (?1, ?2) ON CONFLICT(id) DO NOTHING";

    conn.execute(sql, params![id, display_name])
        .map(|inserted| inserted > 0)
        .context("Failed to insert new player")
}

pub fn find_by_id(conn: &Connection, id: &str) -> Result<Option<PlayerRow>> {
    let sql = "SELECT id, display_name FROM players WHERE id = ?1";

    conn.query_row(sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn list_all(conn: &Connection) -> Result<Vec<PlayerRow>> {
    let sql = "SELECT id, display_name FROM players ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Returns the number of rows changed (0 when the player does not exist)
pub fn update_display_name(conn: &Connection, id: &str, display_name: &str) -> Result<usize> {
    let sql = "UPDATE players SET display_name = ?1 WHERE id = ?2";

    conn.execute(sql, params![display_name, id])
        .context("Failed to update player display name")
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<PlayerRow> {
    Ok(PlayerRow {
        id: row.get(0)?,
        display_name: row.get(1)?,
    })
}
