use actix_web::{web, HttpResponse};
use common::model::station::StationInput;
use log::info;

use crate::db::{station as store, Database};
use crate::error::{AppError, AppResult};

pub async fn list(db: web::Data<Database>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    Ok(HttpResponse::Ok().json(store::list(&conn)?))
}

pub async fn get(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let station = store::get(&conn, *id)?.ok_or_else(|| AppError::not_found("Station not found"))?;
    Ok(HttpResponse::Ok().json(station))
}

pub async fn create(db: web::Data<Database>, input: web::Json<StationInput>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let id = store::insert(&conn, &input).map_err(AppError::from_write)?;
    info!("Created station {}.{} ({})", input.network, input.code, id);
    let station = store::get(&conn, id)?.ok_or_else(|| AppError::not_found("Station not found"))?;
    Ok(HttpResponse::Created().json(station))
}

pub async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    input: web::Json<StationInput>,
) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    if !store::update(&conn, *id, &input).map_err(AppError::from_write)? {
        return Err(AppError::not_found("Station not found"));
    }
    let station = store::get(&conn, *id)?.ok_or_else(|| AppError::not_found("Station not found"))?;
    Ok(HttpResponse::Ok().json(station))
}

pub async fn delete(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    if !store::delete(&conn, *id)? {
        return Err(AppError::not_found("Station not found"));
    }
    info!("Deleted station {}", id);
    Ok(HttpResponse::NoContent().finish())
}
