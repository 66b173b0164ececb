use common::model::bast::{BastRecord, BastRecordInput};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::PAGE_SIZE;

const SELECT: &str = "SELECT b.id, b.bast_id, b.date, b.waktu_pelaksanaan, b.shift, b.kelompok,
        b.kel_berikut, b.events, b.spv, COALESCE(o.name, ''), b.nip, b.event_indonesia,
        b.event_luar, b.event_dirasakan, b.event_dikirim, b.member, b.count_gaps,
        b.count_spikes, b.count_blanks, b.waktu_cs, b.pulsa_poco, b.poco_exp,
        b.samsung_exp, b.notes
   FROM bast_record b
   LEFT JOIN operator o ON o.id = b.spv";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<BastRecord> {
    Ok(BastRecord {
        id: row.get(0)?,
        bast_id: row.get(1)?,
        date: row.get(2)?,
        waktu_pelaksanaan: row.get(3)?,
        shift: row.get(4)?,
        kelompok: row.get(5)?,
        kel_berikut: row.get(6)?,
        events: row.get(7)?,
        spv: row.get(8)?,
        spv_name: row.get(9)?,
        nip: row.get(10)?,
        event_indonesia: row.get(11)?,
        event_luar: row.get(12)?,
        event_dirasakan: row.get(13)?,
        event_dikirim: row.get(14)?,
        member: row.get(15)?,
        count_gaps: row.get(16)?,
        count_spikes: row.get(17)?,
        count_blanks: row.get(18)?,
        waktu_cs: row.get(19)?,
        pulsa_poco: row.get(20)?,
        poco_exp: row.get(21)?,
        samsung_exp: row.get(22)?,
        notes: row.get(23)?,
    })
}

fn query(conn: &Connection, tail: &str, limit: Option<(u32, u32)>) -> rusqlite::Result<Vec<BastRecord>> {
    let sql = match limit {
        Some((count, offset)) => format!("{SELECT} {tail} LIMIT {count} OFFSET {offset}"),
        None => format!("{SELECT} {tail}"),
    };
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], record_from_row)?;
    rows.collect()
}

pub fn count(conn: &Connection) -> rusqlite::Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM bast_record", [], |row| row.get(0))
}

/// Newest first by identifier. `page` is 1-based; `None` returns every record.
pub fn list(conn: &Connection, page: Option<u32>) -> rusqlite::Result<Vec<BastRecord>> {
    let limit = page.map(|p| (PAGE_SIZE, (p.max(1) - 1) * PAGE_SIZE));
    query(conn, "ORDER BY b.bast_id DESC", limit)
}

/// Newest first, capped at `counts` records when `counts > 0`.
pub fn list_latest(conn: &Connection, counts: u32) -> rusqlite::Result<Vec<BastRecord>> {
    let limit = (counts > 0).then_some((counts, 0));
    query(conn, "ORDER BY b.bast_id DESC", limit)
}

/// Oldest first by identifier, the order of the CSV export. Rows that fail to
/// decode are returned in place so the caller can skip them.
pub fn list_ascending(conn: &Connection) -> rusqlite::Result<Vec<rusqlite::Result<BastRecord>>> {
    let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY b.bast_id ASC"))?;
    let rows = stmt.query_map([], record_from_row)?;
    Ok(rows.collect())
}

pub fn get(conn: &Connection, id: i64) -> rusqlite::Result<Option<BastRecord>> {
    conn.query_row(&format!("{SELECT} WHERE b.id = ?1"), params![id], record_from_row)
        .optional()
}

/// The most recently dated record; ties go to the latest insert.
pub fn latest(conn: &Connection) -> rusqlite::Result<Option<BastRecord>> {
    conn.query_row(
        &format!("{SELECT} ORDER BY b.date DESC, b.id DESC LIMIT 1"),
        [],
        record_from_row,
    )
    .optional()
}

pub fn insert(conn: &Connection, input: &BastRecordInput) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO bast_record (bast_id, date, waktu_pelaksanaan, shift, kelompok, kel_berikut,
            events, spv, nip, event_indonesia, event_luar, event_dirasakan, event_dikirim, member,
            count_gaps, count_spikes, count_blanks, waktu_cs, pulsa_poco, poco_exp, samsung_exp, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18,
            ?19, ?20, ?21, ?22)",
        params![
            input.bast_id,
            input.date,
            input.waktu_pelaksanaan,
            input.shift,
            input.kelompok,
            input.kel_berikut,
            input.events,
            input.spv,
            input.nip,
            input.event_indonesia,
            input.event_luar,
            input.event_dirasakan,
            input.event_dikirim,
            input.member_json(),
            input.count_gaps,
            input.count_spikes,
            input.count_blanks,
            input.waktu_cs,
            input.pulsa_poco,
            input.poco_exp,
            input.samsung_exp,
            input.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, input: &BastRecordInput) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE bast_record
            SET bast_id = ?1, date = ?2, waktu_pelaksanaan = ?3, shift = ?4, kelompok = ?5,
                kel_berikut = ?6, events = ?7, spv = ?8, nip = ?9, event_indonesia = ?10,
                event_luar = ?11, event_dirasakan = ?12, event_dikirim = ?13, member = ?14,
                count_gaps = ?15, count_spikes = ?16, count_blanks = ?17, waktu_cs = ?18,
                pulsa_poco = ?19, poco_exp = ?20, samsung_exp = ?21, notes = ?22
          WHERE id = ?23",
        params![
            input.bast_id,
            input.date,
            input.waktu_pelaksanaan,
            input.shift,
            input.kelompok,
            input.kel_berikut,
            input.events,
            input.spv,
            input.nip,
            input.event_indonesia,
            input.event_luar,
            input.event_dirasakan,
            input.event_dikirim,
            input.member_json(),
            input.count_gaps,
            input.count_spikes,
            input.count_blanks,
            input.waktu_cs,
            input.pulsa_poco,
            input.poco_exp,
            input.samsung_exp,
            input.notes,
            id,
        ],
    )?;
    Ok(changed > 0)
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM bast_record WHERE id = ?1", params![id])? > 0)
}

/// Overwrites the stored member field verbatim. Used to keep legacy rows readable in tests.
#[cfg(test)]
pub fn set_raw_member(conn: &Connection, id: i64, raw: &str) -> rusqlite::Result<()> {
    conn.execute("UPDATE bast_record SET member = ?1 WHERE id = ?2", params![raw, id])?;
    Ok(())
}
