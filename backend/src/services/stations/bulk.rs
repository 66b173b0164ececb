//! Station list bulk import from an uploaded CSV file or pasted CSV text.
//!
//! Columns: network, code, province, location, digitizer_type, UPT, longitude,
//! latitude. An uploaded file always starts with a header row; pasted text only
//! when its first row names one of the columns. Rows are numbered from 2 after
//! the header skip, blank lines included. Bad rows are reported and left out, the rest are written in
//! one transaction.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::model::station::{BulkImportReport, FlashMessage, MessageLevel, StationInput};
use futures_util::StreamExt;
use log::{error, info};
use rusqlite::Connection;

use crate::db::{station, Database};
use crate::error::{AppError, AppResult};
use crate::services::{field_file_name, field_name, read_field};

const EXPECTED_HEADERS: [&str; 8] = [
    "network",
    "code",
    "province",
    "location",
    "digitizer_type",
    "UPT",
    "longitude",
    "latitude",
];

/// Up to this many row errors are listed one by one.
const LISTED_ERRORS: usize = 5;
/// Errors shown ahead of the summary when there are more.
const PREVIEWED_ERRORS: usize = 3;

pub enum CsvSource {
    File(Vec<u8>),
    Pasted(Vec<u8>),
}

pub async fn process(db: web::Data<Database>, mut payload: Multipart) -> AppResult<HttpResponse> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut pasted: Option<Vec<u8>> = None;
    let mut remove_existing = false;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
        match field_name(&field).as_deref() {
            Some("csv_file") => {
                let file_name = field_file_name(&field).unwrap_or_default();
                let bytes = read_field(&mut field).await?;
                // An empty file input still sends a part, with no file name.
                if !file_name.is_empty() {
                    file = Some((file_name, bytes));
                }
            }
            Some("csv_data") => {
                let bytes = read_field(&mut field).await?;
                if !bytes.is_empty() {
                    pasted = Some(bytes);
                }
            }
            Some("remove_existing") => {
                remove_existing = !read_field(&mut field).await?.is_empty();
            }
            _ => {}
        }
    }

    let source = match (file, pasted) {
        (Some((file_name, bytes)), _) => {
            if !file_name.ends_with(".csv") {
                return Err(AppError::BadRequest("This is not a CSV file".to_string()));
            }
            CsvSource::File(bytes)
        }
        (None, Some(bytes)) => CsvSource::Pasted(bytes),
        (None, None) => {
            return Err(AppError::BadRequest(
                "Please upload a CSV file or provide CSV data".to_string(),
            ))
        }
    };

    let mut conn = db.connect()?;
    let report = import_stations(&mut conn, source, remove_existing)?;
    info!(
        "Station import: {} created, {} deleted, {} messages",
        report.created,
        report.deleted,
        report.messages.len()
    );
    Ok(HttpResponse::Ok().json(report))
}

pub fn import_stations(
    conn: &mut Connection,
    source: CsvSource,
    remove_existing: bool,
) -> AppResult<BulkImportReport> {
    let (bytes, from_file) = match source {
        CsvSource::File(bytes) => (bytes, true),
        CsvSource::Pasted(bytes) => (bytes, false),
    };
    let text = String::from_utf8(bytes).map_err(|_| {
        error!("Station import input is not valid UTF-8");
        AppError::BadRequest(
            "Error reading CSV file. Please ensure the file is encoded in UTF-8".to_string(),
        )
    })?;
    let rows = read_rows(&text)?;

    let skip_header = match rows.first() {
        None if from_file => return Err(AppError::BadRequest("CSV file is empty".to_string())),
        None => return Err(AppError::BadRequest("CSV data is empty".to_string())),
        Some(first) if from_file => {
            info!("CSV header detected: {:?}", first);
            true
        }
        Some(first) => {
            let header = looks_like_header(first);
            if header {
                info!("Header detected in pasted data: {:?}", first);
            }
            header
        }
    };

    let tx = conn.transaction()?;
    let deleted = if remove_existing {
        let deleted = station::delete_all(&tx)?;
        info!("Deleted {} existing stations as requested", deleted);
        deleted
    } else {
        0
    };

    let mut created = 0;
    let mut errors = Vec::new();
    for (offset, row) in rows.iter().skip(usize::from(skip_header)).enumerate() {
        let row_number = offset + 2;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let input = match station_from_row(row_number, row) {
            Ok(input) => input,
            Err(message) => {
                errors.push(message);
                continue;
            }
        };
        match station::insert(&tx, &input) {
            Ok(_) => created += 1,
            Err(e) => {
                let message = format!("Row {row_number}: Error creating station - {e}");
                error!("{}", message);
                errors.push(message);
            }
        }
    }
    tx.commit()?;

    Ok(BulkImportReport {
        created,
        deleted,
        messages: summarize(remove_existing, deleted, created, &errors),
    })
}

/// Parsed rows in file order. The reader drops blank lines; each one comes back
/// as an empty row so row numbers keep naming the line the user sees.
fn read_rows(text: &str) -> AppResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            AppError::BadRequest(format!(
                "An unexpected error occurred while processing the CSV data: {e}"
            ))
        })?;
        // The position is taken before the reader skips blank lines.
        let start = record.position().map_or(0, |p| p.byte() as usize);
        rows.extend(std::iter::repeat_with(Vec::new).take(blank_lines_at(text.as_bytes(), start)));
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Line breaks between `start` and the next record. A `\n` left over from the
/// previous record's CRLF is not a blank line.
fn blank_lines_at(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    if i > 0 && bytes.get(i - 1) == Some(&b'\r') && bytes.get(i) == Some(&b'\n') {
        i += 1;
    }
    let mut blanks = 0;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\r' => {
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
            }
            b'\n' => i += 1,
            _ => break,
        }
        blanks += 1;
    }
    blanks
}

fn looks_like_header(row: &[String]) -> bool {
    let cells: Vec<String> = row.iter().map(|c| c.to_lowercase()).collect();
    EXPECTED_HEADERS
        .iter()
        .any(|h| cells.contains(&h.to_lowercase()))
}

/// `['a', 'b']`, the way the row is echoed back in error messages.
fn row_repr(row: &[String]) -> String {
    let cells: Vec<String> = row.iter().map(|c| format!("'{c}'")).collect();
    format!("[{}]", cells.join(", "))
}

fn coordinate(row_number: usize, name: &str, raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| format!("Row {row_number}: Invalid {name} value '{raw}'"))
}

fn station_from_row(row_number: usize, row: &[String]) -> Result<StationInput, String> {
    if row.len() < EXPECTED_HEADERS.len() {
        return Err(format!(
            "Row {row_number}: Expected 8 columns, got {}. Row data: {}",
            row.len(),
            row_repr(row)
        ));
    }
    let longitude = coordinate(row_number, "longitude", &row[6])?;
    let latitude = coordinate(row_number, "latitude", &row[7])?;
    Ok(StationInput {
        network: row[0].trim().to_string(),
        code: row[1].trim().to_string(),
        province: row[2].trim().to_string(),
        location: row[3].trim().to_string(),
        digitizer_type: row[4].trim().to_string(),
        upt: row[5].trim().to_string(),
        longitude,
        latitude,
    })
}

fn summarize(
    remove_existing: bool,
    deleted: usize,
    created: usize,
    errors: &[String],
) -> Vec<FlashMessage> {
    let mut messages = Vec::new();
    if remove_existing && deleted > 0 {
        messages.push(FlashMessage::new(
            MessageLevel::Warning,
            format!("{deleted} existing stations were removed as requested"),
        ));
    }
    if created > 0 {
        messages.push(FlashMessage::new(
            MessageLevel::Success,
            format!("{created} stations added successfully"),
        ));
    }
    if errors.len() <= LISTED_ERRORS {
        messages.extend(errors.iter().map(|e| FlashMessage::new(MessageLevel::Error, e.as_str())));
    } else {
        messages.push(FlashMessage::new(
            MessageLevel::Error,
            format!("{} rows had errors. First few errors:", errors.len()),
        ));
        messages.extend(
            errors[..PREVIEWED_ERRORS]
                .iter()
                .map(|e| FlashMessage::new(MessageLevel::Error, e.as_str())),
        );
        messages.push(FlashMessage::new(
            MessageLevel::Warning,
            format!("... and {} more errors", errors.len() - PREVIEWED_ERRORS),
        ));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::test_db;

    const HEADER: &str = "network,code,province,location,digitizer_type,UPT,longitude,latitude\n";

    fn texts(report: &BulkImportReport) -> Vec<&str> {
        report.messages.iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn pasted_header_is_skipped_and_bad_rows_reported() {
        let test_db = test_db();
        let mut conn = test_db.db.connect().unwrap();
        let data = format!(
            "{HEADER}IA,AAI,Maluku,Ambon,Q330,UPT Ambon,128.17,-3.68\n\
             IA,BBJI,Jabar\n\
             IA,CCM,Jatim,Malang,Q330,UPT Malang,abc,-8.0\n\
             IA,DDI,Bali,Denpasar,Q330,, ,\n"
        );
        let report = import_stations(&mut conn, CsvSource::Pasted(data.into_bytes()), false).unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.deleted, 0);
        assert_eq!(
            texts(&report),
            vec![
                "2 stations added successfully",
                "Row 3: Expected 8 columns, got 3. Row data: ['IA', 'BBJI', 'Jabar']",
                "Row 4: Invalid longitude value 'abc'",
            ]
        );
        assert_eq!(report.messages[1].level, MessageLevel::Error);

        let stations = station::list(&conn).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].code, "AAI");
        assert_eq!(stations[0].upt, "UPT Ambon");
        assert_eq!(stations[0].longitude, Some(128.17));
        assert_eq!(stations[1].code, "DDI");
        assert_eq!(stations[1].longitude, None);
        assert_eq!(stations[1].latitude, None);
    }

    #[test]
    fn pasted_rows_without_header_start_at_row_two() {
        let test_db = test_db();
        let mut conn = test_db.db.connect().unwrap();
        let data = "IA,AAI,Maluku,Ambon,Q330,UPT Ambon,1,x\nIA,BBJI,Jabar,Bandung,Q330,UPT Bandung,2,3\n";
        let report =
            import_stations(&mut conn, CsvSource::Pasted(data.as_bytes().to_vec()), false).unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(
            texts(&report),
            vec!["1 stations added successfully", "Row 2: Invalid latitude value 'x'"]
        );
    }

    #[test]
    fn blank_lines_keep_their_row_number() {
        let test_db = test_db();
        let mut conn = test_db.db.connect().unwrap();
        let data = "IA,AAI,Maluku,Ambon,Q330,UPT,1,2\n\nIA,BBJI,Jabar\n";
        let report =
            import_stations(&mut conn, CsvSource::Pasted(data.as_bytes().to_vec()), false).unwrap();
        assert_eq!(report.created, 0);
        assert_eq!(
            texts(&report),
            vec!["Row 3: Expected 8 columns, got 3. Row data: ['IA', 'BBJI', 'Jabar']"]
        );

        let data = "IA,AAI,Maluku,Ambon,Q330,UPT Ambon,1,2\n\n\n\"IA\",\"BBJI\",\"Jawa\nBarat\"\nIA,CCM\n";
        let report =
            import_stations(&mut conn, CsvSource::Pasted(data.as_bytes().to_vec()), false).unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(
            texts(&report),
            vec![
                "1 stations added successfully",
                "Row 5: Expected 8 columns, got 3. Row data: ['IA', 'BBJI', 'Jawa\nBarat']",
                "Row 6: Expected 8 columns, got 2. Row data: ['IA', 'CCM']",
            ]
        );
    }

    #[test]
    fn crlf_line_endings_count_once() {
        assert_eq!(blank_lines_at(b"a\r\nb", 3), 0);
        assert_eq!(blank_lines_at(b"a\r\n\r\nb", 3), 1);
        assert_eq!(blank_lines_at(b"a\n\n\nb", 2), 2);
        assert_eq!(blank_lines_at(b"\nb", 0), 1);
    }

    #[test]
    fn uploaded_file_always_drops_first_row() {
        let test_db = test_db();
        let mut conn = test_db.db.connect().unwrap();
        let data = "IA,AAI,Maluku,Ambon,Q330,UPT,1,2\nIA,BBJI,Jabar,Bandung,Q330,UPT,2,3\n";
        let report =
            import_stations(&mut conn, CsvSource::File(data.as_bytes().to_vec()), false).unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(station::list(&conn).unwrap()[0].code, "BBJI");

        let err = import_stations(&mut conn, CsvSource::File(Vec::new()), false).unwrap_err();
        assert_eq!(err.to_string(), "CSV file is empty");
    }

    #[test]
    fn remove_existing_replaces_the_list() {
        let test_db = test_db();
        let mut conn = test_db.db.connect().unwrap();
        let data = format!("{HEADER}IA,AAI,Maluku,Ambon,Q330,UPT,1,2\nIA,BBJI,Jabar,Bandung,Q330,UPT,2,3\n");
        import_stations(&mut conn, CsvSource::Pasted(data.clone().into_bytes()), false).unwrap();

        let report = import_stations(&mut conn, CsvSource::Pasted(data.into_bytes()), true).unwrap();
        assert_eq!(report.deleted, 2);
        assert_eq!(
            texts(&report),
            vec!["2 existing stations were removed as requested", "2 stations added successfully"]
        );
        assert_eq!(station::count(&conn).unwrap(), 2);
    }

    #[test]
    fn many_errors_are_summarized() {
        let test_db = test_db();
        let mut conn = test_db.db.connect().unwrap();
        let data = "a\nb\nc\nd\ne\nf\n";
        let report =
            import_stations(&mut conn, CsvSource::Pasted(data.as_bytes().to_vec()), false).unwrap();
        assert_eq!(report.created, 0);
        let texts = texts(&report);
        assert_eq!(texts.len(), 5);
        assert_eq!(texts[0], "6 rows had errors. First few errors:");
        assert_eq!(texts[1], "Row 2: Expected 8 columns, got 1. Row data: ['a']");
        assert_eq!(texts[4], "... and 3 more errors");
        assert_eq!(report.messages[4].level, MessageLevel::Warning);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let test_db = test_db();
        let mut conn = test_db.db.connect().unwrap();
        let err = import_stations(&mut conn, CsvSource::Pasted(vec![0xff, 0xfe, b',']), false)
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("UTF-8")));
    }
}
