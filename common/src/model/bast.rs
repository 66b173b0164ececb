//! Shift handover records (*Berita Acara Serah Terima*).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One attendance entry of a handover: the operator's name and their status
/// for the shift (`Hadir`, `Izin`, `Diganti oleh ...`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub nama: String,
    #[serde(default)]
    pub keterangan: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BastRecord {
    pub id: i64,
    pub bast_id: String,
    pub date: NaiveDate,
    pub waktu_pelaksanaan: String,
    pub shift: String,
    pub kelompok: i64,
    pub kel_berikut: i64,
    /// CSV table of the shift's events, header on the first line.
    pub events: String,
    pub spv: Option<i64>,
    /// Supervisor name, joined from the operator table on read.
    pub spv_name: String,
    #[serde(rename = "NIP")]
    pub nip: String,
    pub event_indonesia: i64,
    pub event_luar: i64,
    pub event_dirasakan: i64,
    pub event_dikirim: i64,
    pub member: String,
    pub count_gaps: i64,
    pub count_spikes: i64,
    pub count_blanks: i64,
    pub waktu_cs: String,
    pub pulsa_poco: f64,
    pub poco_exp: NaiveDate,
    pub samsung_exp: NaiveDate,
    pub notes: String,
}

/// Body of a create or update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BastRecordInput {
    pub bast_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub waktu_pelaksanaan: String,
    #[serde(default)]
    pub shift: String,
    pub kelompok: i64,
    pub kel_berikut: i64,
    #[serde(default)]
    pub events: String,
    #[serde(default)]
    pub spv: Option<i64>,
    #[serde(rename = "NIP", default)]
    pub nip: String,
    #[serde(default)]
    pub event_indonesia: i64,
    #[serde(default)]
    pub event_luar: i64,
    #[serde(default)]
    pub event_dirasakan: i64,
    #[serde(default)]
    pub event_dikirim: i64,
    #[serde(default)]
    pub member: Vec<Member>,
    #[serde(default)]
    pub count_gaps: i64,
    #[serde(default)]
    pub count_spikes: i64,
    #[serde(default)]
    pub count_blanks: i64,
    #[serde(default)]
    pub waktu_cs: String,
    #[serde(default)]
    pub pulsa_poco: f64,
    pub poco_exp: NaiveDate,
    pub samsung_exp: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl BastRecordInput {
    /// The stored form of the member list. New records are always written as JSON.
    pub fn member_json(&self) -> String {
        serde_json::to_string(&self.member).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Reads a stored member field.
///
/// Current records hold a JSON array of [`Member`]. Older rows held one name
/// per line; those are returned with an empty status.
pub fn parse_members(raw: &str) -> Vec<Member> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<Member>>(raw) {
        Ok(members) => members,
        Err(_) => raw
            .split('\n')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Member {
                nama: name.to_string(),
                keterangan: String::new(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_members() {
        let raw = r#"[{"nama":"A","keterangan":"Hadir"},{"nama":"B"}]"#;
        let members = parse_members(raw);
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].keterangan, "Hadir");
        assert_eq!(members[1].keterangan, "");
    }

    #[test]
    fn falls_back_to_one_name_per_line() {
        let members = parse_members("Andi\n\n  Budi \n");
        assert_eq!(
            members,
            vec![
                Member { nama: "Andi".into(), keterangan: String::new() },
                Member { nama: "Budi".into(), keterangan: String::new() },
            ]
        );
    }

    #[test]
    fn empty_field_has_no_members() {
        assert!(parse_members("").is_empty());
        assert!(parse_members("  ").is_empty());
    }
}
