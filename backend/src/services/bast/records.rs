use actix_web::{web, HttpResponse};
use common::model::bast::BastRecordInput;
use common::model::page::Page;
use common::requests::ListQuery;
use log::info;

use crate::db::{bast as store, Database};
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

pub async fn list_latest(db: web::Data<Database>, counts: web::Path<u32>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let records = store::list_latest(&conn, counts.into_inner())?;
    Ok(HttpResponse::Ok().json(records))
}

pub async fn get(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let record = store::get(&conn, *id)?.ok_or_else(|| AppError::not_found("BAST record not found"))?;
    Ok(HttpResponse::Ok().json(record))
}

pub async fn create(
    db: web::Data<Database>,
    input: web::Json<BastRecordInput>,
) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let id = store::insert(&conn, &input).map_err(AppError::from_write)?;
    info!("Created BAST record {} ({})", input.bast_id, id);
    let record = store::get(&conn, id)?.ok_or_else(|| AppError::not_found("BAST record not found"))?;
    Ok(HttpResponse::Created().json(record))
}

pub async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    input: web::Json<BastRecordInput>,
) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    if !store::update(&conn, *id, &input).map_err(AppError::from_write)? {
        return Err(AppError::not_found("BAST record not found"));
    }
    info!("Updated BAST record {}", input.bast_id);
    let record = store::get(&conn, *id)?.ok_or_else(|| AppError::not_found("BAST record not found"))?;
    Ok(HttpResponse::Ok().json(record))
}

pub async fn delete(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    if !store::delete(&conn, *id)? {
        return Err(AppError::not_found("BAST record not found"));
    }
    info!("Deleted BAST record {}", id);
    Ok(HttpResponse::NoContent().finish())
}
