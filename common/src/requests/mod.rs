use chrono::NaiveDate;
use serde::Deserialize;

/// Query string of the paginated record listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    /// `all=1` disables pagination.
    pub all: Option<String>,
}

impl ListQuery {
    pub fn show_all(&self) -> bool {
        self.all.as_deref() == Some("1")
    }
}

/// Query string of the checklist statistics endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub time: Option<String>,
}
