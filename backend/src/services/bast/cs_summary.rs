use actix_web::{web, HttpResponse};
use common::model::checklist::CsSummary;

use crate::db::{checklist, Database};
use crate::error::{AppError, AppResult};

/// Counts of the checklist `cs_id`, used to prefill the handover's QC section.
pub async fn process(db: web::Data<Database>, cs_id: web::Path<String>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let record = checklist::find_by_cs_id(&conn, &cs_id)?
        .ok_or_else(|| AppError::not_found("CS record not found"))?;
    Ok(HttpResponse::Ok().json(CsSummary {
        count_gaps: record.count_gaps,
        count_spikes: record.count_spikes,
        count_blanks: record.count_blanks,
        waktu_cs: record.jam_pelaksanaan,
    }))
}
