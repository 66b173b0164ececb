//! Seiscomp QA checklist (CS) records.
//!
//! Routes under `/api/checklist`:
//! - `GET/POST /records`, `GET/PUT/DELETE /records/{id}`: CRUD, paginated by ten
//!   unless `all=1`.
//! - `GET /records/api/{counts}`: newest records with operator name and image URL.
//! - `POST/DELETE /records/{id}/image`: attach (multipart `slmon_image`) or unlink
//!   the SLMON screenshot.
//! - `GET /records/{id}/xlsx`, `GET /records/{id}/pdf`: the filled checklist.
//! - `GET /feed`: the current gap/spike/blank lists from the waveform checker.
//! - `GET /stats`: series and per-station frequencies for a date window.
//! - `GET /export/csv`: every record as CSV.

mod export_csv;
mod feed;
mod image;
mod records;
mod report;
mod stats;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;
use common::model::checklist::CsRecord;

use super::media_url;

const API_PATH: &str = "/api/checklist";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/records", get().to(records::list))
        .route("/records", post().to(records::create))
        .route("/records/api/{counts}", get().to(records::list_latest))
        .route("/records/{id}", get().to(records::get))
        .route("/records/{id}", put().to(records::update))
        .route("/records/{id}", delete().to(records::delete))
        .route("/records/{id}/image", post().to(image::upload))
        .route("/records/{id}/image", delete().to(image::clear))
        .route("/records/{id}/xlsx", get().to(report::xlsx))
        .route("/records/{id}/pdf", get().to(report::pdf))
        .route("/feed", get().to(feed::process))
        .route("/stats", get().to(stats::process))
        .route("/export/csv", get().to(export_csv::process))
}

/// Replaces the stored screenshot name with its public URL.
fn with_image_url(mut record: CsRecord) -> CsRecord {
    record.slmon_image = record.slmon_image.map(|f| media_url(&f));
    record
}
