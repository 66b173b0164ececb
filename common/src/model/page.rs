use serde::Serialize;

/// One page of a listing. `num_pages` is 1 and `page` is 1 when pagination is off.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub num_pages: u32,
    pub total: u64,
}
