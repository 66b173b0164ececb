//! Time series and per-station error frequencies over a date window.
//! Charts are drawn client-side from this payload.

use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use chrono::{Duration, Local, NaiveDate};
use common::model::checklist::{ChecklistStats, CsRecord, StationErrors};
use common::requests::StatsQuery;

use crate::db::{checklist as store, Database};
use crate::error::AppResult;

const ALL_TIMES: &str = "All";
const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Clone, Copy)]
enum ErrorKind {
    Gap,
    Spike,
    Blank,
}

pub fn compute_stats(
    records: &[CsRecord],
    start_date: NaiveDate,
    end_date: NaiveDate,
    selected_time: String,
) -> ChecklistStats {
    let mut stats = ChecklistStats {
        start_date,
        end_date,
        selected_time,
        labels: Vec::with_capacity(records.len()),
        gaps: Vec::with_capacity(records.len()),
        blanks: Vec::with_capacity(records.len()),
        spikes: Vec::with_capacity(records.len()),
        slmon: Vec::with_capacity(records.len()),
        stations: Vec::new(),
    };
    // First-seen order, so equal totals keep a stable order after sorting.
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        stats
            .labels
            .push(format!("{} {}", record.date.format("%Y-%m-%d"), record.jam_pelaksanaan));
        stats.gaps.push(record.count_gaps);
        stats.blanks.push(record.count_blanks);
        stats.spikes.push(record.count_spikes);
        stats.slmon.push(record.slmon);

        for (list, kind) in [
            (&record.gaps, ErrorKind::Gap),
            (&record.spikes, ErrorKind::Spike),
            (&record.blanks, ErrorKind::Blank),
        ] {
            for station in list.lines() {
                let slot = *index.entry(station.to_string()).or_insert_with(|| {
                    stats.stations.push(StationErrors {
                        station: station.to_string(),
                        ..StationErrors::default()
                    });
                    stats.stations.len() - 1
                });
                let entry = &mut stats.stations[slot];
                match kind {
                    ErrorKind::Gap => entry.gaps += 1,
                    ErrorKind::Spike => entry.spikes += 1,
                    ErrorKind::Blank => entry.blanks += 1,
                }
            }
        }
    }

    stats.stations.sort_by(|a, b| b.total().cmp(&a.total()));
    stats
}

pub async fn process(db: web::Data<Database>, query: web::Query<StatsQuery>) -> AppResult<HttpResponse> {
    let (start, end) = match (query.start_date, query.end_date) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            let today = Local::now().date_naive();
            (today - Duration::days(DEFAULT_WINDOW_DAYS), today)
        }
    };
    let selected_time = query
        .time
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| ALL_TIMES.to_string());
    let jam = (selected_time != ALL_TIMES).then_some(selected_time.as_str());

    let conn = db.connect()?;
    let records = store::list_between(&conn, start, end, jam)?;
    Ok(HttpResponse::Ok().json(compute_stats(&records, start, end, selected_time)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, jam: &str, gaps: &str, spikes: &str, blanks: &str) -> CsRecord {
        CsRecord {
            id: day as i64,
            cs_id: format!("CS-2024-12-{day:02}-1P"),
            date: NaiveDate::from_ymd_opt(2024, 12, day).unwrap(),
            shift: "Pagi".to_string(),
            jam_pelaksanaan: jam.to_string(),
            kelompok: "I".to_string(),
            operator: None,
            operator_name: String::new(),
            gaps: gaps.to_string(),
            spikes: spikes.to_string(),
            blanks: blanks.to_string(),
            slmon: Some(97.5),
            count_gaps: gaps.lines().count() as i64,
            count_spikes: spikes.lines().count() as i64,
            count_blanks: blanks.lines().count() as i64,
            slmon_image: None,
        }
    }

    #[test]
    fn series_and_station_totals() {
        let records = vec![
            record(10, "06:00 WIB", "AAI\nBBJI", "", "CCM"),
            record(11, "12:00 WIB", "BBJI", "BBJI", ""),
        ];
        let start = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let stats = compute_stats(&records, start, end, "All".to_string());

        assert_eq!(stats.labels, vec!["2024-12-10 06:00 WIB", "2024-12-11 12:00 WIB"]);
        assert_eq!(stats.gaps, vec![2, 1]);
        assert_eq!(stats.spikes, vec![0, 1]);
        assert_eq!(stats.blanks, vec![1, 0]);
        assert_eq!(stats.slmon, vec![Some(97.5), Some(97.5)]);

        let order: Vec<&str> = stats.stations.iter().map(|s| s.station.as_str()).collect();
        assert_eq!(order, vec!["BBJI", "AAI", "CCM"]);
        assert_eq!(
            stats.stations[0],
            StationErrors {
                station: "BBJI".to_string(),
                gaps: 2,
                spikes: 1,
                blanks: 0
            }
        );
    }
}
