use actix_web::{web, HttpResponse};
use common::model::checklist::{CsRecordInput, JAM_PELAKSANAAN, SHIFTS};
use common::model::page::Page;
use common::requests::ListQuery;
use log::info;

use super::with_image_url;
use crate::db::{checklist as store, Database};
use crate::error::{AppError, AppResult};
use crate::services::resolve_page;

pub async fn list(db: web::Data<Database>, query: web::Query<ListQuery>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let total = store::count(&conn)?;
    let (page, num_pages) = resolve_page(&query, total)?;
    let items = store::list(&conn, page)?;
    Ok(HttpResponse::Ok().json(Page {
        items,
        page: page.unwrap_or(1),
        num_pages,
        total,
    }))
}

/// Newest first with the operator name and the screenshot as a URL.
pub async fn list_latest(db: web::Data<Database>, counts: web::Path<u32>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let records: Vec<_> = store::list_latest(&conn, counts.into_inner())?
        .into_iter()
        .map(with_image_url)
        .collect();
    Ok(HttpResponse::Ok().json(records))
}

pub async fn get(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let record = store::get(&conn, *id)?.ok_or_else(|| AppError::not_found("CS record not found"))?;
    Ok(HttpResponse::Ok().json(record))
}

/// Shift and execution time must be one of the form's choices.
fn check_choices(input: &CsRecordInput) -> AppResult<()> {
    if !SHIFTS.contains(&input.shift.as_str()) {
        return Err(AppError::BadRequest(format!("'{}' is not a valid shift", input.shift)));
    }
    if !JAM_PELAKSANAAN.contains(&input.jam_pelaksanaan.as_str()) {
        return Err(AppError::BadRequest(format!(
            "'{}' is not a valid execution time",
            input.jam_pelaksanaan
        )));
    }
    Ok(())
}

pub async fn create(db: web::Data<Database>, input: web::Json<CsRecordInput>) -> AppResult<HttpResponse> {
    check_choices(&input)?;
    let conn = db.connect()?;
    let id = store::insert(&conn, &input).map_err(AppError::from_write)?;
    info!("Created CS record {} ({})", input.cs_id, id);
    let record = store::get(&conn, id)?.ok_or_else(|| AppError::not_found("CS record not found"))?;
    Ok(HttpResponse::Created().json(record))
}

/// Replaces the record's fields. The attached screenshot is left alone.
pub async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    input: web::Json<CsRecordInput>,
) -> AppResult<HttpResponse> {
    check_choices(&input)?;
    let conn = db.connect()?;
    if !store::update(&conn, *id, &input).map_err(AppError::from_write)? {
        return Err(AppError::not_found("CS record not found"));
    }
    info!("Updated CS record {}", input.cs_id);
    let record = store::get(&conn, *id)?.ok_or_else(|| AppError::not_found("CS record not found"))?;
    Ok(HttpResponse::Ok().json(record))
}

pub async fn delete(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    if !store::delete(&conn, *id)? {
        return Err(AppError::not_found("CS record not found"));
    }
    info!("Deleted CS record {}", id);
    Ok(HttpResponse::NoContent().finish())
}
