//! Operators and shift groups (`Kelompok`), shared by both record types.
//!
//! Routes under `/api/personnel`:
//! - `GET/POST /operators`, `GET/PUT/DELETE /operators/{id}`, `GET /operators/{id}/nip`
//! - `GET/POST /kelompok`, `GET/PUT/DELETE /kelompok/{id}`,
//!   `GET /kelompok/{name}/members`

mod kelompok;
mod operators;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/personnel";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/operators", get().to(operators::list))
        .route("/operators", post().to(operators::create))
        .route("/operators/{id}", get().to(operators::get))
        .route("/operators/{id}", put().to(operators::update))
        .route("/operators/{id}", delete().to(operators::delete))
        .route("/operators/{id}/nip", get().to(operators::nip))
        .route("/kelompok", get().to(kelompok::list))
        .route("/kelompok", post().to(kelompok::create))
        .route("/kelompok/{id}", get().to(kelompok::get))
        .route("/kelompok/{id}", put().to(kelompok::update))
        .route("/kelompok/{id}", delete().to(kelompok::delete))
        .route("/kelompok/{name}/members", get().to(kelompok::members))
}
