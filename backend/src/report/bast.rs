//! Fills the handover template (`BAST.xlsx`) from a stored record.

use std::sync::LazyLock;

use common::model::bast::{parse_members, BastRecord, Member};
use regex::Regex;

use super::locale::{format_date_indonesian, format_rupiah, group_label, hari_indonesia};
use super::{
    date_from_record_id, put, Alignment, Border, CellRef, CellValue, Line, ReportError, Sheet,
};

/// Title given to the populated sheet.
pub const SHEET_TITLE: &str = "BAST";

const MAX_MEMBER_ROWS: usize = 10;
const FIRST_MEMBER_ROW: u32 = 9;

/// Rows of the event table are inserted above this row.
const EVENT_ANCHOR_ROW: u32 = 29;
const FIRST_EVENT_COL: u32 = 3;
const LEFT_EDGE_COL: u32 = 2;
const RIGHT_EDGE_COL: u32 = 17;
const LAST_GRID_COL: u32 = 16;
const REGION_COL: u32 = 11;
const MMI_COL: u32 = 12;

pub const BASE_ROW_HEIGHT: f64 = 15.75;
const MMI_CHARS_PER_LINE: usize = 23;

static HADIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*hadir\s*$").expect("valid attendance pattern"));
static DIGANTI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*diganti\b.*$").expect("valid replacement pattern"));

/// An attendee counts as present when marked `hadir` or replaced (`diganti ...`).
pub fn is_present(keterangan: &str) -> bool {
    HADIR.is_match(keterangan) || DIGANTI.is_match(keterangan)
}

pub fn count_present(members: &[Member]) -> usize {
    members
        .iter()
        .take(MAX_MEMBER_ROWS)
        .filter(|m| is_present(&m.keterangan))
        .count()
}

/// Height of an event row whose MMI description is `mmi`: one base line per
/// started block of 23 characters once the text no longer fits on one line.
pub fn event_row_height(mmi: &str) -> f64 {
    let len = mmi.chars().count();
    if len > MMI_CHARS_PER_LINE {
        BASE_ROW_HEIGHT * ((len / MMI_CHARS_PER_LINE) + 1) as f64
    } else {
        BASE_ROW_HEIGHT
    }
}

/// Data rows of the stored events CSV. The first line is the header and is dropped;
/// short rows are padded to the header width.
pub fn parse_events(events: &str) -> Result<Vec<Vec<String>>, ReportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(events.as_bytes());
    let width = reader.headers()?.len();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.len() < width {
            row.resize(width, String::new());
        }
        rows.push(row);
    }
    Ok(rows)
}

pub fn populate_bast_sheet<S: Sheet + ?Sized>(
    sheet: &mut S,
    record: &BastRecord,
) -> Result<(), ReportError> {
    sheet.set_title(SHEET_TITLE);

    let date = date_from_record_id(&record.bast_id, 5, record.date);
    let tanggal = format_date_indonesian(date);
    let hari = hari_indonesia(date);

    put(sheet, "J4", group_label(record.kelompok))?;
    put(sheet, "J6", group_label(record.kel_berikut))?;
    put(sheet, "N4", format!(": {tanggal}"))?;
    put(sheet, "N5", format!(": {hari}"))?;

    let members = parse_members(&record.member);
    for (idx, member) in members.iter().take(MAX_MEMBER_ROWS).enumerate() {
        let row = FIRST_MEMBER_ROW + idx as u32;
        sheet.set_value(CellRef::new(10, row), CellValue::from(idx as i64 + 1));
        sheet.set_value(CellRef::new(11, row), member.nama.as_str().into());
        sheet.set_value(CellRef::new(12, row), member.keterangan.as_str().into());
    }
    put(sheet, "L19", count_present(&members).to_string())?;

    put(sheet, "N6", format!(": {}", record.waktu_pelaksanaan))?;
    put(sheet, "G22", record.event_indonesia.to_string())?;
    put(sheet, "G23", record.event_luar.to_string())?;
    put(sheet, "G24", (record.event_indonesia + record.event_luar).to_string())?;
    put(sheet, "L22", format!(": {} event", record.event_dirasakan))?;
    put(sheet, "L23", format!(": {} event", record.event_dikirim))?;
    put(sheet, "E33", format!("Pukul: {}", record.waktu_cs))?;
    put(
        sheet,
        "E34",
        format!(
            "IA (549) : Gaps = {} ; Spike = {} ; Blank = {}",
            record.count_gaps, record.count_spikes, record.count_blanks
        ),
    )?;
    put(sheet, "E38", format_rupiah(record.pulsa_poco))?;
    put(sheet, "E40", record.poco_exp.format("%d %b %Y").to_string())?;
    put(sheet, "G40", record.samsung_exp.format("%d %b %Y").to_string())?;
    put(sheet, "C47", format!("Jakarta, {tanggal}"))?;
    put(sheet, "C55", record.spv_name.as_str())?;
    put(sheet, "C56", format!("NIP. {}", record.nip))?;
    put(sheet, "D44", record.notes.as_str())?;

    // Cells above were addressed against the unexpanded template; the
    // inserted event rows push everything from row 29 down with them.
    let events = parse_events(&record.events)?;
    write_event_table(sheet, &events);
    Ok(())
}

fn write_event_table<S: Sheet + ?Sized>(sheet: &mut S, events: &[Vec<String>]) {
    if events.is_empty() {
        return;
    }
    sheet.insert_rows(EVENT_ANCHOR_ROW, events.len() as u32);

    for (idx, fields) in events.iter().enumerate() {
        let row = EVENT_ANCHOR_ROW + idx as u32;
        for (offset, field) in fields.iter().enumerate() {
            let at = CellRef::new(FIRST_EVENT_COL + offset as u32, row);
            if !field.is_empty() {
                sheet.set_value(at, CellValue::infer(field));
            }
            sheet.set_alignment(at, Alignment::centered());
        }
        sheet.set_border(
            CellRef::new(LEFT_EDGE_COL, row),
            Border {
                left: Some(Line::Medium),
                ..Border::default()
            },
        );
        sheet.set_border(
            CellRef::new(RIGHT_EDGE_COL, row),
            Border {
                right: Some(Line::Medium),
                ..Border::default()
            },
        );
        sheet.set_alignment(CellRef::new(REGION_COL, row), Alignment::left());

        let mmi_cell = CellRef::new(MMI_COL, row);
        match sheet.value(mmi_cell).filter(|v| !v.is_empty()) {
            Some(mmi) => {
                sheet.set_row_height(row, event_row_height(&mmi));
                sheet.set_alignment(mmi_cell, Alignment::wrapped());
            }
            None => sheet.set_row_height(row, BASE_ROW_HEIGHT),
        }
        for col in FIRST_EVENT_COL..=LAST_GRID_COL {
            sheet.set_border(CellRef::new(col, row), Border::all(Line::Thin));
        }
    }
}
