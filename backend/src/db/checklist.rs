use chrono::NaiveDate;
use common::model::checklist::{CsRecord, CsRecordInput};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::PAGE_SIZE;

const SELECT: &str = "SELECT c.id, c.cs_id, c.date, c.shift, c.jam_pelaksanaan, c.kelompok,
        c.operator, COALESCE(o.name, ''), c.gaps, c.spikes, c.blanks, c.slmon, c.count_gaps,
        c.count_spikes, c.count_blanks, c.slmon_image
   FROM cs_record c
   LEFT JOIN operator o ON o.id = c.operator";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<CsRecord> {
    Ok(CsRecord {
        id: row.get(0)?,
        cs_id: row.get(1)?,
        date: row.get(2)?,
        shift: row.get(3)?,
        jam_pelaksanaan: row.get(4)?,
        kelompok: row.get(5)?,
        operator: row.get(6)?,
        operator_name: row.get(7)?,
        gaps: row.get(8)?,
        spikes: row.get(9)?,
        blanks: row.get(10)?,
        slmon: row.get(11)?,
        count_gaps: row.get(12)?,
        count_spikes: row.get(13)?,
        count_blanks: row.get(14)?,
        slmon_image: row.get(15)?,
    })
}

fn query(conn: &Connection, tail: &str, limit: Option<(u32, u32)>) -> rusqlite::Result<Vec<CsRecord>> {
    let sql = match limit {
        Some((count, offset)) => format!("{SELECT} {tail} LIMIT {count} OFFSET {offset}"),
        None => format!("{SELECT} {tail}"),
    };
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], record_from_row)?;
    rows.collect()
}

pub fn count(conn: &Connection) -> rusqlite::Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM cs_record", [], |row| row.get(0))
}

pub fn list(conn: &Connection, page: Option<u32>) -> rusqlite::Result<Vec<CsRecord>> {
    let limit = page.map(|p| (PAGE_SIZE, (p.max(1) - 1) * PAGE_SIZE));
    query(conn, "ORDER BY c.cs_id DESC", limit)
}

pub fn list_latest(conn: &Connection, counts: u32) -> rusqlite::Result<Vec<CsRecord>> {
    let limit = (counts > 0).then_some((counts, 0));
    query(conn, "ORDER BY c.cs_id DESC", limit)
}

/// Oldest first, per-row results as for the handover export.
pub fn list_ascending(conn: &Connection) -> rusqlite::Result<Vec<rusqlite::Result<CsRecord>>> {
    let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY c.cs_id ASC"))?;
    let rows = stmt.query_map([], record_from_row)?;
    Ok(rows.collect())
}

/// Records dated within `[start, end]`, optionally restricted to one execution slot.
pub fn list_between(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    jam_pelaksanaan: Option<&str>,
) -> rusqlite::Result<Vec<CsRecord>> {
    let mut sql = format!("{SELECT} WHERE c.date BETWEEN ?1 AND ?2");
    if jam_pelaksanaan.is_some() {
        sql.push_str(" AND c.jam_pelaksanaan = ?3");
    }
    sql.push_str(" ORDER BY c.date, c.jam_pelaksanaan, c.id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = match jam_pelaksanaan {
        Some(jam) => stmt.query_map(params![start, end, jam], record_from_row)?,
        None => stmt.query_map(params![start, end], record_from_row)?,
    };
    rows.collect()
}

pub fn get(conn: &Connection, id: i64) -> rusqlite::Result<Option<CsRecord>> {
    conn.query_row(&format!("{SELECT} WHERE c.id = ?1"), params![id], record_from_row)
        .optional()
}

pub fn find_by_cs_id(conn: &Connection, cs_id: &str) -> rusqlite::Result<Option<CsRecord>> {
    conn.query_row(&format!("{SELECT} WHERE c.cs_id = ?1"), params![cs_id], record_from_row)
        .optional()
}

pub fn insert(conn: &Connection, input: &CsRecordInput) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO cs_record (cs_id, date, shift, jam_pelaksanaan, kelompok, operator, gaps,
            spikes, blanks, slmon, count_gaps, count_spikes, count_blanks)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            input.cs_id,
            input.date,
            input.shift,
            input.jam_pelaksanaan,
            input.kelompok,
            input.operator,
            input.gaps,
            input.spikes,
            input.blanks,
            input.slmon,
            input.count_gaps,
            input.count_spikes,
            input.count_blanks,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Updates every field except the attached image, which has its own endpoint.
pub fn update(conn: &Connection, id: i64, input: &CsRecordInput) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE cs_record
            SET cs_id = ?1, date = ?2, shift = ?3, jam_pelaksanaan = ?4, kelompok = ?5,
                operator = ?6, gaps = ?7, spikes = ?8, blanks = ?9, slmon = ?10,
                count_gaps = ?11, count_spikes = ?12, count_blanks = ?13
          WHERE id = ?14",
        params![
            input.cs_id,
            input.date,
            input.shift,
            input.jam_pelaksanaan,
            input.kelompok,
            input.operator,
            input.gaps,
            input.spikes,
            input.blanks,
            input.slmon,
            input.count_gaps,
            input.count_spikes,
            input.count_blanks,
            id,
        ],
    )?;
    Ok(changed > 0)
}

pub fn set_image(conn: &Connection, id: i64, file_name: Option<&str>) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE cs_record SET slmon_image = ?1 WHERE id = ?2",
        params![file_name, id],
    )?;
    Ok(changed > 0)
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM cs_record WHERE id = ?1", params![id])? > 0)
}
