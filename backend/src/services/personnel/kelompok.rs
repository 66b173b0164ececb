use actix_web::{web, HttpResponse};
use common::model::personnel::KelompokInput;
use log::info;
use serde_json::json;

use crate::db::{personnel as store, Database};
use crate::error::{AppError, AppResult};

pub async fn list(db: web::Data<Database>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    Ok(HttpResponse::Ok().json(store::list_kelompok(&conn)?))
}

pub async fn get(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let kelompok = store::get_kelompok(&conn, *id)?.ok_or_else(|| AppError::not_found("Kelompok not found"))?;
    Ok(HttpResponse::Ok().json(kelompok))
}

/// Names of the operators listed in the group's comma-separated `member` ids.
pub async fn members(db: web::Data<Database>, name: web::Path<String>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let kelompok = store::find_kelompok_by_name(&conn, &name)?
        .ok_or_else(|| AppError::not_found("Kelompok not found"))?;

    let mut names = Vec::new();
    for raw in kelompok.member.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let id: i64 = raw
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Invalid member id '{raw}'")))?;
        let operator = store::get_operator(&conn, id)?
            .ok_or_else(|| AppError::not_found("One or more members not found"))?;
        names.push(operator.name);
    }
    Ok(HttpResponse::Ok().json(json!({ "member_data": names })))
}

pub async fn create(db: web::Data<Database>, input: web::Json<KelompokInput>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let id = store::insert_kelompok(&conn, &input).map_err(AppError::from_write)?;
    info!("Created kelompok {} ({})", input.name, id);
    let kelompok = store::get_kelompok(&conn, id)?.ok_or_else(|| AppError::not_found("Kelompok not found"))?;
    Ok(HttpResponse::Created().json(kelompok))
}

pub async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    input: web::Json<KelompokInput>,
) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    if !store::update_kelompok(&conn, *id, &input).map_err(AppError::from_write)? {
        return Err(AppError::not_found("Kelompok not found"));
    }
    let kelompok = store::get_kelompok(&conn, *id)?.ok_or_else(|| AppError::not_found("Kelompok not found"))?;
    Ok(HttpResponse::Ok().json(kelompok))
}

pub async fn delete(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    if !store::delete_kelompok(&conn, *id)? {
        return Err(AppError::not_found("Kelompok not found"));
    }
    info!("Deleted kelompok {}", id);
    Ok(HttpResponse::NoContent().finish())
}
