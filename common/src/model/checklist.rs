//! Per-shift QA checklist records for the Seiscomp acquisition system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Execution slots offered by the checklist form.
pub const JAM_PELAKSANAAN: [&str; 4] = ["00:00 WIB", "06:00 WIB", "12:00 WIB", "18:00 WIB"];

/// Shift names offered by the checklist form.
pub const SHIFTS: [&str; 4] = ["Pagi", "Siang", "Malam", "Dini Hari"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsRecord {
    pub id: i64,
    pub cs_id: String,
    pub date: NaiveDate,
    pub shift: String,
    pub jam_pelaksanaan: String,
    pub kelompok: String,
    pub operator: Option<i64>,
    /// Operator name, joined from the operator table on read.
    pub operator_name: String,
    /// Station codes with gaps, one per line.
    pub gaps: String,
    pub spikes: String,
    pub blanks: String,
    pub slmon: Option<f64>,
    pub count_gaps: i64,
    pub count_spikes: i64,
    pub count_blanks: i64,
    /// File name of the SLMON screenshot inside the media directory.
    pub slmon_image: Option<String>,
}

impl CsRecord {
    pub fn gap_codes(&self) -> Vec<&str> {
        self.gaps.lines().collect()
    }

    pub fn spike_codes(&self) -> Vec<&str> {
        self.spikes.lines().collect()
    }

    pub fn blank_codes(&self) -> Vec<&str> {
        self.blanks.lines().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsRecordInput {
    pub cs_id: String,
    pub date: NaiveDate,
    pub shift: String,
    pub jam_pelaksanaan: String,
    #[serde(default)]
    pub kelompok: String,
    #[serde(default)]
    pub operator: Option<i64>,
    #[serde(default)]
    pub gaps: String,
    #[serde(default)]
    pub spikes: String,
    #[serde(default)]
    pub blanks: String,
    #[serde(default)]
    pub slmon: Option<f64>,
    #[serde(default)]
    pub count_gaps: i64,
    #[serde(default)]
    pub count_spikes: i64,
    #[serde(default)]
    pub count_blanks: i64,
}

/// Summary of a checklist as used by the handover form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsSummary {
    pub count_gaps: i64,
    pub count_spikes: i64,
    pub count_blanks: i64,
    pub waktu_cs: String,
}

/// Gap/spike/blank lists produced by the external waveform checker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveformFeed {
    pub last_update: String,
    pub gaps: String,
    pub blanks: String,
    pub spikes: String,
}

/// Per-station error frequency over a stats window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationErrors {
    pub station: String,
    pub gaps: u32,
    pub spikes: u32,
    pub blanks: u32,
}

impl StationErrors {
    pub fn total(&self) -> u32 {
        self.gaps + self.spikes + self.blanks
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistStats {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub selected_time: String,
    pub labels: Vec<String>,
    pub gaps: Vec<i64>,
    pub blanks: Vec<i64>,
    pub spikes: Vec<i64>,
    pub slmon: Vec<Option<f64>>,
    pub stations: Vec<StationErrors>,
}
