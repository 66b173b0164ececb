//! Shift handover (BAST) records.
//!
//! Routes under `/api/bast`:
//! - `GET/POST /records`, `GET/PUT/DELETE /records/{id}`: CRUD; the listing is
//!   paginated by ten unless `all=1`.
//! - `GET /records/api/{counts}`: newest records with the supervisor name, capped
//!   at `counts` when positive.
//! - `GET /records/{id}/xlsx`, `GET /records/{id}/pdf`: the filled handover form.
//! - `GET /previous/{field}`: carry-forward values from the latest handover.
//! - `GET /cs/{cs_id}`: checklist counts used to prefill the handover.
//! - `GET /export/csv`: every record as CSV.

mod cs_summary;
mod export_csv;
mod previous;
mod records;
mod report;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/bast";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/records", get().to(records::list))
        .route("/records", post().to(records::create))
        .route("/records/api/{counts}", get().to(records::list_latest))
        .route("/records/{id}", get().to(records::get))
        .route("/records/{id}", put().to(records::update))
        .route("/records/{id}", delete().to(records::delete))
        .route("/records/{id}/xlsx", get().to(report::xlsx))
        .route("/records/{id}/pdf", get().to(report::pdf))
        .route("/previous/{field}", get().to(previous::process))
        .route("/cs/{cs_id}", get().to(cs_summary::process))
        .route("/export/csv", get().to(export_csv::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{test_db, TestDb};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use chrono::NaiveDate;
    use common::model::bast::{BastRecordInput, Member};
    use serde_json::{json, Value};

    fn input(bast_id: &str, date: &str) -> BastRecordInput {
        BastRecordInput {
            bast_id: bast_id.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            waktu_pelaksanaan: "13:00 - 19:00 WIB".to_string(),
            shift: "Siang".to_string(),
            kelompok: 3,
            kel_berikut: 4,
            events: String::new(),
            spv: None,
            nip: "1987".to_string(),
            event_indonesia: 4,
            event_luar: 2,
            event_dirasakan: 1,
            event_dikirim: 5,
            member: vec![Member {
                nama: "Ani".to_string(),
                keterangan: "Hadir".to_string(),
            }],
            count_gaps: 1,
            count_spikes: 0,
            count_blanks: 2,
            waktu_cs: "12:00 WIB".to_string(),
            pulsa_poco: 150000.0,
            poco_exp: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            samsung_exp: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
            notes: String::new(),
        }
    }

    macro_rules! app {
        ($test_db:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($test_db.db.clone()))
                    .app_data(web::Data::new($test_db.config()))
                    .service(configure_routes()),
            )
            .await
        };
    }

    fn seed(test_db: &TestDb, records: &[BastRecordInput]) -> Vec<i64> {
        let conn = test_db.db.connect().unwrap();
        records
            .iter()
            .map(|r| crate::db::bast::insert(&conn, r).unwrap())
            .collect()
    }

    #[actix_web::test]
    async fn empty_csv_export_is_bom_and_header() {
        let test_db = test_db();
        let app = app!(test_db);
        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/bast/export/csv").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-disposition").unwrap(),
            "attachment; filename=\"bast_records_export.csv\""
        );
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"\xEF\xBB\xBF\"BAST ID\",\"Date\""));
        assert!(body.ends_with(b"\"Notes\"\r\n"));
        assert_eq!(body.iter().filter(|b| **b == b'\n').count(), 1);
    }

    #[actix_web::test]
    async fn csv_export_is_ordered_by_identifier() {
        let test_db = test_db();
        seed(
            &test_db,
            &[input("BAST-2024-12-12-1P", "2024-12-12"), input("BAST-2024-12-11-2S", "2024-12-11")],
        );
        let app = app!(test_db);
        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/bast/export/csv").to_request()).await;
        let body = String::from_utf8(test::read_body(resp).await[3..].to_vec()).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("\"BAST-2024-12-11-2S\",\"2024-12-11\""));
        assert!(lines[2].contains("\"150000.0\",\"2025-01-31\",\"2025-02-28\""));
    }

    #[actix_web::test]
    async fn missing_record_is_404() {
        let test_db = test_db();
        let app = app!(test_db);
        for req in [
            test::TestRequest::get().uri("/api/bast/records/42"),
            test::TestRequest::delete().uri("/api/bast/records/42"),
            test::TestRequest::get().uri("/api/bast/records/42/xlsx"),
            test::TestRequest::get().uri("/api/bast/cs/CS-2024-12-11-1P"),
        ] {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        }
    }

    #[actix_web::test]
    async fn previous_values_come_from_the_latest_record() {
        let test_db = test_db();
        let app = app!(test_db);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/bast/previous/poco_exp").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "poco_exp": null }));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/bast/previous/members").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));

        let mut older = input("BAST-2024-12-10-1P", "2024-12-10");
        older.pulsa_poco = 5000.0;
        let ids = seed(&test_db, &[input("BAST-2024-12-11-1P", "2024-12-11"), older]);
        let conn = test_db.db.connect().unwrap();
        crate::db::bast::set_raw_member(&conn, ids[0], "Ani\n  Budi \n\n").unwrap();

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/bast/previous/pulsa_poco").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "pulsa_poco": 150000.0 }));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/bast/previous/members").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!([{ "nama": "Ani", "keterangan": "" }, { "nama": "Budi", "keterangan": "" }])
        );
    }

    #[actix_web::test]
    async fn create_then_list_latest() {
        let test_db = test_db();
        let app = app!(test_db);
        let req = test::TestRequest::post()
            .uri("/api/bast/records")
            .set_json(input("BAST-2024-12-11-1P", "2024-12-11"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let dup = test::TestRequest::post()
            .uri("/api/bast/records")
            .set_json(input("BAST-2024-12-11-1P", "2024-12-11"))
            .to_request();
        assert_eq!(test::call_service(&app, dup).await.status(), StatusCode::BAD_REQUEST);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/bast/records/api/5").to_request()).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["spv_name"], "");
        assert_eq!(body[0]["NIP"], "1987");
    }
}
