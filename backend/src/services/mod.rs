//! HTTP surface. Each functional area registers one Actix scope.

pub mod bast;
pub mod checklist;
pub mod personnel;
pub mod stations;

mod download;

use actix_multipart::Field;
use common::requests::ListQuery;
use futures_util::StreamExt;

use crate::db::num_pages;
use crate::error::{AppError, AppResult};

/// Public URL of a file stored in the media directory.
pub(crate) fn media_url(file_name: &str) -> String {
    format!("/media/{file_name}")
}

/// Resolves `?page=&all=` against `total` rows into the page to fetch
/// (`None` for all rows) and the page count.
pub(crate) fn resolve_page(query: &ListQuery, total: u64) -> AppResult<(Option<u32>, u32)> {
    if query.show_all() {
        return Ok((None, 1));
    }
    let pages = num_pages(total);
    let page = query.page.unwrap_or(1);
    if page == 0 || page > pages {
        return Err(AppError::not_found(format!("Invalid page ({page})")));
    }
    Ok((Some(page), pages))
}

/// Drains one multipart field into memory.
pub(crate) async fn read_field(field: &mut Field) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(format!("upload interrupted: {e}")))?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

pub(crate) fn field_name(field: &Field) -> Option<String> {
    field
        .content_disposition()
        .and_then(|cd| cd.get_name().map(|n| n.to_string()))
}

pub(crate) fn field_file_name(field: &Field) -> Option<String> {
    field
        .content_disposition()
        .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<u32>, all: Option<&str>) -> ListQuery {
        ListQuery {
            page,
            all: all.map(str::to_string),
        }
    }

    #[test]
    fn pages_are_resolved_against_the_total() {
        assert_eq!(resolve_page(&query(None, None), 0).unwrap(), (Some(1), 1));
        assert_eq!(resolve_page(&query(Some(3), None), 25).unwrap(), (Some(3), 3));
        assert_eq!(resolve_page(&query(Some(9), Some("1")), 25).unwrap(), (None, 1));
        assert!(matches!(
            resolve_page(&query(Some(4), None), 25),
            Err(AppError::NotFound(_))
        ));
    }
}
