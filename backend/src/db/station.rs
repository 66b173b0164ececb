use common::model::station::{Station, StationInput};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMNS: &str =
    "id, network, code, province, location, digitizer_type, upt, longitude, latitude";

fn station_from_row(row: &Row<'_>) -> rusqlite::Result<Station> {
    Ok(Station {
        id: row.get(0)?,
        network: row.get(1)?,
        code: row.get(2)?,
        province: row.get(3)?,
        location: row.get(4)?,
        digitizer_type: row.get(5)?,
        upt: row.get(6)?,
        longitude: row.get(7)?,
        latitude: row.get(8)?,
    })
}

pub fn list(conn: &Connection) -> rusqlite::Result<Vec<Station>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM station ORDER BY id"))?;
    let rows = stmt.query_map([], station_from_row)?;
    rows.collect()
}

pub fn get(conn: &Connection, id: i64) -> rusqlite::Result<Option<Station>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM station WHERE id = ?1"),
        params![id],
        station_from_row,
    )
    .optional()
}

pub fn count(conn: &Connection) -> rusqlite::Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM station", [], |row| row.get(0))
}

pub fn insert(conn: &Connection, input: &StationInput) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO station (network, code, province, location, digitizer_type, upt, longitude, latitude)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            input.network,
            input.code,
            input.province,
            input.location,
            input.digitizer_type,
            input.upt,
            input.longitude,
            input.latitude,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, input: &StationInput) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE station
            SET network = ?1, code = ?2, province = ?3, location = ?4,
                digitizer_type = ?5, upt = ?6, longitude = ?7, latitude = ?8
          WHERE id = ?9",
        params![
            input.network,
            input.code,
            input.province,
            input.location,
            input.digitizer_type,
            input.upt,
            input.longitude,
            input.latitude,
            id,
        ],
    )?;
    Ok(changed > 0)
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM station WHERE id = ?1", params![id])? > 0)
}

/// Removes every station and returns how many there were.
pub fn delete_all(conn: &Connection) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM station", [])
}
