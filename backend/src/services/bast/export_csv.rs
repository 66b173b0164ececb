use actix_web::{web, HttpResponse};
use common::model::bast::BastRecord;
use log::info;

use crate::db::{bast as store, Database};
use crate::services::download::{amount_text, csv_attachment, csv_failure, write_csv};

const FILE_NAME: &str = "bast_records_export.csv";

const HEADER: [&str; 22] = [
    "BAST ID",
    "Date",
    "Waktu Pelaksanaan",
    "Shift",
    "Kelompok",
    "Kelompok Berikut",
    "Events",
    "Supervisor",
    "NIP",
    "Event Indonesia",
    "Event Luar",
    "Event Dirasakan",
    "Event Dikirim",
    "Members",
    "Count Gaps",
    "Count Spikes",
    "Count Blanks",
    "Waktu CS",
    "Pulsa Poco",
    "POCO Expiry",
    "Samsung Expiry",
    "Notes",
];

/// Group numbers of zero are written as empty cells.
fn group(n: i64) -> String {
    if n == 0 {
        String::new()
    } else {
        n.to_string()
    }
}

fn fields(r: &BastRecord) -> Vec<String> {
    vec![
        r.bast_id.clone(),
        r.date.format("%Y-%m-%d").to_string(),
        r.waktu_pelaksanaan.clone(),
        r.shift.clone(),
        group(r.kelompok),
        group(r.kel_berikut),
        r.events.clone(),
        r.spv_name.clone(),
        r.nip.clone(),
        r.event_indonesia.to_string(),
        r.event_luar.to_string(),
        r.event_dirasakan.to_string(),
        r.event_dikirim.to_string(),
        r.member.clone(),
        r.count_gaps.to_string(),
        r.count_spikes.to_string(),
        r.count_blanks.to_string(),
        r.waktu_cs.clone(),
        amount_text(r.pulsa_poco),
        r.poco_exp.format("%Y-%m-%d").to_string(),
        r.samsung_exp.format("%Y-%m-%d").to_string(),
        r.notes.clone(),
    ]
}

pub async fn process(db: web::Data<Database>) -> HttpResponse {
    info!("Starting BAST records export");
    let rows = match db.connect().and_then(|conn| store::list_ascending(&conn)) {
        Ok(rows) => rows,
        Err(e) => return csv_failure(e),
    };
    match write_csv("BAST", &HEADER, rows, fields) {
        Ok(bytes) => csv_attachment(FILE_NAME, bytes),
        Err(e) => csv_failure(e),
    }
}
