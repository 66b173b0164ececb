//! Values carried forward from the most recent handover into a new one.

use actix_web::{web, HttpResponse};
use common::model::bast::parse_members;
use serde_json::{json, Map, Value};

use crate::db::{bast as store, Database};
use crate::error::{AppError, AppResult};

pub async fn process(db: web::Data<Database>, field: web::Path<String>) -> AppResult<HttpResponse> {
    let field = field.into_inner();
    let conn = db.connect()?;
    let latest = store::latest(&conn)?;

    if field == "members" {
        let members = latest.map(|r| parse_members(&r.member)).unwrap_or_default();
        return Ok(HttpResponse::Ok().json(members));
    }

    let value = match (field.as_str(), &latest) {
        ("poco_exp", Some(r)) => json!(r.poco_exp),
        ("samsung_exp", Some(r)) => json!(r.samsung_exp),
        ("pulsa_poco", Some(r)) => json!(r.pulsa_poco),
        ("poco_exp" | "samsung_exp" | "pulsa_poco", None) => Value::Null,
        _ => return Err(AppError::not_found(format!("Unknown field '{field}'"))),
    };
    let mut body = Map::new();
    body.insert(field, value);
    if latest.is_some() {
        Ok(HttpResponse::Ok().json(body))
    } else {
        Ok(HttpResponse::NotFound().json(body))
    }
}
