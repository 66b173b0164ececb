//! Response builders for file downloads, plus the CSV writer shared by both exports.

use std::fmt::Display;

use actix_web::http::header;
use actix_web::HttpResponse;
use log::{error, info};

use crate::report::pdf::PDF_CONTENT_TYPE;
use crate::report::xlsx::XLSX_CONTENT_TYPE;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn xlsx_attachment(stem: &str, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={stem}.xlsx"),
        ))
        .body(bytes)
}

pub fn pdf_inline(stem: &str, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(PDF_CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("inline; filename={stem}.pdf"),
        ))
        .body(bytes)
}

pub fn csv_attachment(file_name: &str, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .insert_header((header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"))
        .insert_header((header::PRAGMA, "no-cache"))
        .insert_header((header::EXPIRES, "0"))
        .body(bytes)
}

pub fn csv_failure(err: impl Display) -> HttpResponse {
    error!("CSV export failed: {}", err);
    HttpResponse::InternalServerError()
        .content_type("text/plain; charset=utf-8")
        .body(format!("Error generating CSV: {err}"))
}

/// Writes a BOM-prefixed, fully quoted CSV. Rows that could not be loaded are
/// logged under `label` and left out.
pub fn write_csv<T, E: Display>(
    label: &str,
    header: &[&str],
    rows: Vec<Result<T, E>>,
    fields: impl Fn(&T) -> Vec<String>,
) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(UTF8_BOM.to_vec());
    writer.write_record(header)?;

    let total = rows.len();
    let mut written = 0;
    for (index, row) in rows.into_iter().enumerate() {
        match row {
            Ok(record) => {
                writer.write_record(fields(&record))?;
                written += 1;
            }
            Err(e) => error!("Skipping {} row {}: {}", label, index + 1, e),
        }
    }
    info!("Exported {} of {} {} rows", written, total, label);

    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Python-style `str(float)`: integral values keep a trailing `.0`.
pub fn float_text(value: f64) -> String {
    format!("{value:?}")
}

/// Amount columns write a zero as a bare `0`, everything else as [`float_text`].
pub fn amount_text(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        float_text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_export_is_bom_and_header() {
        let rows: Vec<Result<Vec<String>, String>> = Vec::new();
        let bytes = write_csv("test", &["A", "B"], rows, |r| r.clone()).unwrap();
        assert_eq!(bytes, b"\xEF\xBB\xBF\"A\",\"B\"\r\n".to_vec());
    }

    #[test]
    fn failed_rows_are_skipped() {
        let rows = vec![
            Ok(vec!["1".to_string(), "x".to_string()]),
            Err("bad date".to_string()),
            Ok(vec!["3".to_string(), "he said \"hi\"".to_string()]),
        ];
        let bytes = write_csv("test", &["id", "note"], rows, |r| r.clone()).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert_eq!(
            text,
            "\"id\",\"note\"\r\n\"1\",\"x\"\r\n\"3\",\"he said \"\"hi\"\"\"\r\n"
        );
    }

    #[test]
    fn floats_print_like_python() {
        assert_eq!(float_text(150000.0), "150000.0");
        assert_eq!(float_text(12.5), "12.5");
    }

    #[test]
    fn zero_amounts_print_without_fraction() {
        assert_eq!(amount_text(0.0), "0");
        assert_eq!(amount_text(-0.0), "0");
        assert_eq!(amount_text(150000.0), "150000.0");
    }
}
