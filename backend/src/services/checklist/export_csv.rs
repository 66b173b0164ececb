use actix_web::{web, HttpResponse};
use common::model::checklist::CsRecord;
use log::info;

use crate::db::{checklist as store, Database};
use crate::services::download::{csv_attachment, csv_failure, float_text, write_csv};

const FILE_NAME: &str = "cs_records_export.csv";

const HEADER: [&str; 14] = [
    "CS ID",
    "Date",
    "Shift",
    "Jam Pelaksanaan",
    "Kelompok",
    "Operator",
    "Gaps",
    "Spikes",
    "Blanks",
    "SLMON",
    "Count Gaps",
    "Count Spikes",
    "Count Blanks",
    "SLMON Image",
];

fn fields(r: &CsRecord) -> Vec<String> {
    vec![
        r.cs_id.clone(),
        r.date.format("%Y-%m-%d").to_string(),
        r.shift.clone(),
        r.jam_pelaksanaan.clone(),
        r.kelompok.clone(),
        r.operator_name.clone(),
        r.gaps.clone(),
        r.spikes.clone(),
        r.blanks.clone(),
        r.slmon.map(float_text).unwrap_or_default(),
        r.count_gaps.to_string(),
        r.count_spikes.to_string(),
        r.count_blanks.to_string(),
        r.slmon_image.clone().unwrap_or_default(),
    ]
}

pub async fn process(db: web::Data<Database>) -> HttpResponse {
    info!("Starting CS records export");
    let rows = match db.connect().and_then(|conn| store::list_ascending(&conn)) {
        Ok(rows) => rows,
        Err(e) => return csv_failure(e),
    };
    match write_csv("CS", &HEADER, rows, fields) {
        Ok(bytes) => csv_attachment(FILE_NAME, bytes),
        Err(e) => csv_failure(e),
    }
}
