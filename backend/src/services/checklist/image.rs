//! SLMON screenshot attachment. Files live under `<media>/slmon_images/` with
//! random names; the record stores the path relative to the media directory.

use std::path::Path;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use log::{info, warn};
use tokio::fs;
use uuid::Uuid;

use super::with_image_url;
use crate::config::AppConfig;
use crate::db::{checklist as store, Database};
use crate::error::{AppError, AppResult};
use crate::services::{field_file_name, field_name, read_field};

const IMAGE_DIR: &str = "slmon_images";
const FIELD: &str = "slmon_image";

fn stored_name(upload_name: &str) -> String {
    let ext = Path::new(upload_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "png".to_string());
    format!("{IMAGE_DIR}/{}.{ext}", Uuid::new_v4())
}

pub async fn upload(
    config: web::Data<AppConfig>,
    db: web::Data<Database>,
    id: web::Path<i64>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    if store::get(&conn, *id)?.is_none() {
        return Err(AppError::not_found("CS record not found"));
    }

    let mut stored: Option<String> = None;
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
        if field_name(&field).as_deref() != Some(FIELD) {
            continue;
        }

        let upload_name = field_file_name(&field).unwrap_or_default();
        let mime = mime_guess::from_path(&upload_name).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(AppError::BadRequest(format!("'{upload_name}' is not an image")));
        }
        let bytes = read_field(&mut field).await?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("The submitted image is empty".to_string()));
        }
        if let Err(e) = ::image::load_from_memory(&bytes) {
            warn!("Rejected SLMON upload '{}': {}", upload_name, e);
            return Err(AppError::BadRequest(format!("'{upload_name}' is not a readable image")));
        }

        let relative = stored_name(&upload_name);
        let target = config.media_dir.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, &bytes).await?;
        stored = Some(relative);
    }

    let relative = stored.ok_or_else(|| AppError::BadRequest(format!("Missing '{FIELD}' file")))?;
    store::set_image(&conn, *id, Some(&relative))?;
    info!("Attached {} to CS record {}", relative, id);

    let record = store::get(&conn, *id)?.ok_or_else(|| AppError::not_found("CS record not found"))?;
    Ok(HttpResponse::Ok().json(with_image_url(record)))
}

/// Unlinks the screenshot. The file itself stays in the media directory.
pub async fn clear(db: web::Data<Database>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let conn = db.connect()?;
    if !store::set_image(&conn, *id, None)? {
        return Err(AppError::not_found("CS record not found"));
    }
    info!("Cleared image of CS record {}", id);
    Ok(HttpResponse::NoContent().finish())
}
