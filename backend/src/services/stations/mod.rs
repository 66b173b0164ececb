//! Seismic station list.
//!
//! Routes under `/api/stations`:
//! - `GET/POST /`, `GET/PUT/DELETE /{id}`: CRUD.
//! - `POST /bulk`: multipart import with a `csv_file` or `csv_data` part and an
//!   optional `remove_existing` flag; answers with counts and status messages.

mod bulk;
mod records;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/stations";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(records::list))
        .route("", post().to(records::create))
        .route("/bulk", post().to(bulk::process))
        .route("/{id}", get().to(records::get))
        .route("/{id}", put().to(records::update))
        .route("/{id}", delete().to(records::delete))
}
