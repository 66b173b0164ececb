use actix_web::{web, HttpResponse};
use common::model::personnel::OperatorInput;
use log::info;
use serde_json::json;

use crate::db::{personnel as store, Database};
use crate::error::{AppError, AppResult};

pub async fn list(db: web::Data<Database>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    Ok(HttpResponse::Ok().json(store::list_operators(&conn)?))
}

pub async fn get(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let operator = store::get_operator(&conn, *id)?.ok_or_else(|| AppError::not_found("Operator not found"))?;
    Ok(HttpResponse::Ok().json(operator))
}

/// The operator's NIP, used to prefill the supervisor block of a handover.
pub async fn nip(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let operator = store::get_operator(&conn, *id)?.ok_or_else(|| AppError::not_found("Operator not found"))?;
    Ok(HttpResponse::Ok().json(json!({ "nip": operator.nip })))
}

pub async fn create(db: web::Data<Database>, input: web::Json<OperatorInput>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    let id = store::insert_operator(&conn, &input).map_err(AppError::from_write)?;
    info!("Created operator {} ({})", input.name, id);
    let operator = store::get_operator(&conn, id)?.ok_or_else(|| AppError::not_found("Operator not found"))?;
    Ok(HttpResponse::Created().json(operator))
}

pub async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    input: web::Json<OperatorInput>,
) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    if !store::update_operator(&conn, *id, &input).map_err(AppError::from_write)? {
        return Err(AppError::not_found("Operator not found"));
    }
    let operator = store::get_operator(&conn, *id)?.ok_or_else(|| AppError::not_found("Operator not found"))?;
    Ok(HttpResponse::Ok().json(operator))
}

/// Records that referenced the operator keep their data with no supervisor/operator.
pub async fn delete(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    if !store::delete_operator(&conn, *id)? {
        return Err(AppError::not_found("Operator not found"));
    }
    info!("Deleted operator {}", id);
    Ok(HttpResponse::NoContent().finish())
}
