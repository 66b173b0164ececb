use actix_web::{web, HttpResponse};
use log::info;

use crate::config::AppConfig;
use crate::db::{checklist as store, Database};
use crate::error::{AppError, AppResult};
use crate::report::{pdf, simplify_record_id, xlsx, ReportError};
use crate::services::download;

pub async fn xlsx(
    config: web::Data<AppConfig>,
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let record = store::get(&conn, *id)?.ok_or_else(|| AppError::not_found("CS record not found"))?;
    let stem = simplify_record_id(&record.cs_id);
    let image = record.slmon_image.as_ref().map(|f| config.media_dir.join(f));

    let template = config.checklist_template();
    let bytes = web::block(move || -> Result<Vec<u8>, ReportError> {
        xlsx::render_checklist(&template, &record, image.as_deref())?.to_bytes()
    })
    .await
    .map_err(|e| AppError::External(e.to_string()))??;
    info!("Rendered checklist {} as XLSX", stem);
    Ok(download::xlsx_attachment(&stem, bytes))
}

pub async fn pdf(
    config: web::Data<AppConfig>,
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let record = store::get(&conn, *id)?.ok_or_else(|| AppError::not_found("CS record not found"))?;
    let stem = simplify_record_id(&record.cs_id);
    let image = record.slmon_image.as_ref().map(|f| config.media_dir.join(f));

    let template = config.checklist_template();
    let pdf_stem = stem.clone();
    let bytes = web::block(move || -> Result<Vec<u8>, ReportError> {
        let workbook = xlsx::render_checklist(&template, &record, image.as_deref())?;
        pdf::xlsx_to_pdf(&workbook.to_bytes()?, &pdf_stem)
    })
    .await
    .map_err(|e| AppError::External(e.to_string()))??;
    Ok(download::pdf_inline(&stem, bytes))
}
