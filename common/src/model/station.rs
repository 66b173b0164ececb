use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    pub network: String,
    pub code: String,
    pub province: String,
    pub location: String,
    pub digitizer_type: String,
    #[serde(rename = "UPT")]
    pub upt: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationInput {
    pub network: String,
    pub code: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub digitizer_type: String,
    #[serde(rename = "UPT", default)]
    pub upt: String,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Warning,
    Error,
}

/// A user-facing status line, the API counterpart of a flash message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Outcome of a station bulk import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkImportReport {
    pub created: usize,
    pub deleted: usize,
    pub messages: Vec<FlashMessage>,
}
