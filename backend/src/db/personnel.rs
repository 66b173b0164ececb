use common::model::personnel::{Kelompok, KelompokInput, Operator, OperatorInput};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn operator_from_row(row: &Row<'_>) -> rusqlite::Result<Operator> {
    Ok(Operator {
        id: row.get(0)?,
        name: row.get(1)?,
        nip: row.get(2)?,
    })
}

fn kelompok_from_row(row: &Row<'_>) -> rusqlite::Result<Kelompok> {
    Ok(Kelompok {
        id: row.get(0)?,
        name: row.get(1)?,
        member: row.get(2)?,
    })
}

pub fn list_operators(conn: &Connection) -> rusqlite::Result<Vec<Operator>> {
    let mut stmt = conn.prepare("SELECT id, name, nip FROM operator ORDER BY name")?;
    let rows = stmt.query_map([], operator_from_row)?;
    rows.collect()
}

pub fn get_operator(conn: &Connection, id: i64) -> rusqlite::Result<Option<Operator>> {
    conn.query_row(
        "SELECT id, name, nip FROM operator WHERE id = ?1",
        params![id],
        operator_from_row,
    )
    .optional()
}

pub fn insert_operator(conn: &Connection, input: &OperatorInput) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO operator (name, nip) VALUES (?1, ?2)",
        params![input.name, input.nip],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns `false` when no operator has this id.
pub fn update_operator(conn: &Connection, id: i64, input: &OperatorInput) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE operator SET name = ?1, nip = ?2 WHERE id = ?3",
        params![input.name, input.nip, id],
    )?;
    Ok(changed > 0)
}

pub fn delete_operator(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM operator WHERE id = ?1", params![id])? > 0)
}

pub fn list_kelompok(conn: &Connection) -> rusqlite::Result<Vec<Kelompok>> {
    let mut stmt = conn.prepare("SELECT id, name, member FROM kelompok ORDER BY name")?;
    let rows = stmt.query_map([], kelompok_from_row)?;
    rows.collect()
}

pub fn get_kelompok(conn: &Connection, id: i64) -> rusqlite::Result<Option<Kelompok>> {
    conn.query_row(
        "SELECT id, name, member FROM kelompok WHERE id = ?1",
        params![id],
        kelompok_from_row,
    )
    .optional()
}

pub fn find_kelompok_by_name(conn: &Connection, name: &str) -> rusqlite::Result<Option<Kelompok>> {
    conn.query_row(
        "SELECT id, name, member FROM kelompok WHERE name = ?1",
        params![name],
        kelompok_from_row,
    )
    .optional()
}

pub fn insert_kelompok(conn: &Connection, input: &KelompokInput) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO kelompok (name, member) VALUES (?1, ?2)",
        params![input.name, input.member],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_kelompok(conn: &Connection, id: i64, input: &KelompokInput) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE kelompok SET name = ?1, member = ?2 WHERE id = ?3",
        params![input.name, input.member, id],
    )?;
    Ok(changed > 0)
}

pub fn delete_kelompok(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM kelompok WHERE id = ?1", params![id])? > 0)
}
