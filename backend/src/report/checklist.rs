//! Fills the Seiscomp checklist template (`cl_seiscomp.xlsx`).

use std::path::Path;

use chrono::Duration;
use common::model::checklist::CsRecord;

use super::locale::{date_range_to_string, format_date_indonesian, hari_indonesia};
use super::{date_from_record_id, put, CellRef, CellValue, ReportError, Sheet, Workbook};

pub const CHECKLIST_SHEET: &str = "checklist_seiscomp";
pub const CHECKLIST_TITLE: &str = "Checklist Seiscomp";
pub const SLMON_SHEET: &str = "slmon";

/// Placement of the SLMON screenshot (8.6 x 4.14 inches at 96 dpi).
const IMAGE_ANCHOR: &str = "B3";
const IMAGE_WIDTH_PX: u32 = 826;
const IMAGE_HEIGHT_PX: u32 = 397;

/// A block of station rows: the code column and the gap/spike/blank flag columns.
struct StationBlock {
    first_row: u32,
    last_row: u32,
    code_col: u32,
    flag_cols: [u32; 3],
}

/// Stations ordered without SLMON (B, flags D-F) and with SLMON (I, flags P-R).
const STATION_BLOCKS: [StationBlock; 2] = [
    StationBlock {
        first_row: 7,
        last_row: 287,
        code_col: 2,
        flag_cols: [4, 5, 6],
    },
    StationBlock {
        first_row: 7,
        last_row: 274,
        code_col: 9,
        flag_cols: [16, 17, 18],
    },
];

fn is_night_shift(record: &CsRecord) -> bool {
    record.shift.to_uppercase() == "MALAM"
}

/// Marks a 1 beside every station code found in the record's gap, spike or blank list.
pub fn stamp_station_flags<S: Sheet + ?Sized>(sheet: &mut S, record: &CsRecord) {
    let lists = [record.gap_codes(), record.spike_codes(), record.blank_codes()];
    for block in &STATION_BLOCKS {
        for row in block.first_row..=block.last_row {
            let Some(code) = sheet.value(CellRef::new(block.code_col, row)) else {
                continue;
            };
            for (codes, flag_col) in lists.iter().zip(block.flag_cols) {
                if codes.contains(&code.as_str()) {
                    sheet.set_value(CellRef::new(flag_col, row), CellValue::Number(1.0));
                }
            }
        }
    }
}

/// Populates both sheets of the checklist template. `image` is the resolved
/// path of the attached SLMON screenshot, if the record has one.
pub fn prepare_workbook<W: Workbook>(
    workbook: &mut W,
    record: &CsRecord,
    image: Option<&Path>,
) -> Result<(), ReportError> {
    let date = date_from_record_id(&record.cs_id, 3, record.date);
    let night = is_night_shift(record);
    let jam = format!("JAM {}", record.jam_pelaksanaan);

    let sheet = workbook
        .sheet(CHECKLIST_SHEET)
        .ok_or_else(|| ReportError::MissingSheet(CHECKLIST_SHEET.to_string()))?;
    sheet.set_title(CHECKLIST_TITLE);

    let tanggal = if night {
        date_range_to_string(date, date + Duration::days(1))
    } else {
        format!("{}, {}", hari_indonesia(date), format_date_indonesian(date))
    };
    put(sheet, "R3", tanggal)?;
    put(sheet, "A3", format!("KELOMPOK: {}", record.kelompok))?;
    put(sheet, "A2", format!("SHIFT {}", record.shift.to_uppercase()))?;
    put(sheet, "H286", record.operator_name.as_str())?;
    for a1 in ["D5", "P5", "H276"] {
        put(sheet, a1, jam.as_str())?;
    }
    stamp_station_flags(sheet, record);

    let sheet = workbook
        .sheet(SLMON_SHEET)
        .ok_or_else(|| ReportError::MissingSheet(SLMON_SHEET.to_string()))?;
    let slmon_date = if night { date + Duration::days(1) } else { date };
    let tanggal = format_date_indonesian(slmon_date);
    put(sheet, "A2", format!("{tanggal}, pukul {}", record.jam_pelaksanaan))?;
    put(sheet, "M24", format!("Jakarta, {tanggal}"))?;
    put(sheet, "C28", record.operator_name.as_str())?;

    match image {
        Some(path) if path.is_file() => {
            let anchor = CellRef::parse(IMAGE_ANCHOR)?;
            match sheet.add_image(anchor, path, IMAGE_WIDTH_PX, IMAGE_HEIGHT_PX) {
                Ok(()) => {}
                Err(ReportError::UnreadableImage(reason)) => {
                    log::warn!("SLMON image skipped: {}", reason);
                    put(sheet, IMAGE_ANCHOR, "Image file not found")?;
                }
                Err(e) => return Err(e),
            }
        }
        Some(path) => {
            log::warn!("SLMON image {} is missing", path.display());
            put(sheet, IMAGE_ANCHOR, "Image file not found")?;
        }
        None => put(sheet, IMAGE_ANCHOR, "No image")?,
    }
    Ok(())
}
