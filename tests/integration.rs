//! Integration tests for the TPS decoder.
//!
//! This test suite covers:
//! - Decoding the slim mock dataset end to end
//! - Header and day-block records sharing a composite key
//! - Notes containing the delimiter
//! - Last-write-wins aggregation
//! - Error policies
//! - The HTTP decode endpoint

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use tps_decoder::api::{AppState, create_router};
use tps_decoder::config::{ConfigLoader, DecoderConfig, ErrorPolicy, FinalPeriod};
use tps_decoder::decoding::{DecodeReport, decode_lines, group_rows};
use tps_decoder::error::DecodeError;
use tps_decoder::models::{PeriodLabel, RecordTag};
use tps_decoder::source::{lines_from_str, read_lines};

// =============================================================================
// Test Helpers
// =============================================================================

const SLIM_DATASET: &str = "./data/mock/data_small.csv";

fn decode_slim(config: &DecoderConfig) -> DecodeReport {
    let lines = read_lines(SLIM_DATASET).expect("Failed to read slim dataset");
    decode_lines(lines, config).expect("Decoding should not abort")
}

fn create_router_for_test() -> Router {
    let loader = ConfigLoader::load("./config/decoder.yaml").expect("Failed to load config");
    create_router(AppState::new(loader.into_config()))
}

async fn post_decode(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/decode")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

// =============================================================================
// Slim dataset
// =============================================================================

#[test]
fn test_slim_dataset_decodes_without_errors() {
    let report = decode_slim(&DecoderConfig::default());

    assert!(report.errors.is_empty(), "unexpected errors: {:?}", report.errors);
    assert_eq!(report.lines_read, 8);
    assert_eq!(report.lines_decoded, 8);
    assert_eq!(report.records.keys().collect::<Vec<_>>(), vec!["EMP001", "EMP002"]);
}

#[test]
fn test_slim_dataset_header_record() {
    let report = decode_slim(&DecoderConfig::default());
    let header = report.records.get("EMP001").unwrap().header().unwrap();

    assert_eq!(header.line_number, 1);
    assert!(header.length_valid);
    assert_eq!(header.token_count, 26);
    assert_eq!(header.expected_token_count, 26);
    assert_eq!(header.record.record_composite_id, "K01");
    assert_eq!(header.record.staff_id, "STAFF9");
    assert_eq!(header.record.target_year_month, "202401");
    assert_eq!(header.record.dispatch_name, "本社営業所");
    assert_eq!(header.record.staff_name.as_deref(), Some("佐藤 花子"));
    assert_eq!(header.record.approver_name.as_deref(), Some("承認者 山田"));
}

#[test]
fn test_slim_dataset_first_third() {
    let report = decode_slim(&DecoderConfig::default());
    let blocks = report
        .records
        .get("EMP001")
        .unwrap()
        .day_blocks(RecordTag::DayBlockFirstThird)
        .unwrap();

    assert_eq!(blocks.period_label, PeriodLabel::FirstThird);
    assert_eq!(blocks.day_records.len(), 10);

    let days: Vec<&str> = blocks.day_records.iter().map(|d| d.day.as_str()).collect();
    assert_eq!(days, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);
    assert_eq!(blocks.day_records[0].day_of_week, "月");
    assert_eq!(blocks.day_records[1].day_of_week, "火");

    let fifth = &blocks.day_records[4];
    assert_eq!(fifth.work_time_mins, 480);
    assert_eq!(fifth.work_late_overtime_mins, 30);
    assert_eq!(fifth.reserved_12, Some(0));

    let saturday = &blocks.day_records[5];
    assert_eq!(saturday.day_of_week, "土");
    assert_eq!(saturday.reserved_4, None);
    assert_eq!(saturday.day_notification_category.as_deref(), Some("公休"));
    assert_eq!(saturday.work_time_mins, 0);
}

#[test]
fn test_slim_dataset_notes_with_delimiter() {
    let report = decode_slim(&DecoderConfig::default());
    let blocks = report
        .records
        .get("EMP001")
        .unwrap()
        .day_blocks(RecordTag::DayBlockFirstThird)
        .unwrap();

    let third = &blocks.day_records[2];
    assert_eq!(third.notes.as_deref(), Some("電車遅延15分"));
    assert_eq!(third.work_overtime_mins, 60);
    assert_eq!(third.work_late_overtime_mins, 0);
    assert_eq!(blocks.raw_blocks[2].len(), 14);

    // The final block of the line also carries split notes.
    let tenth = &blocks.day_records[9];
    assert_eq!(tenth.notes.as_deref(), Some("電車遅延15分"));
    assert_eq!(tenth.work_late_overtime_mins, 30);
}

#[test]
fn test_slim_dataset_final_third_labels() {
    let report = decode_slim(&DecoderConfig::default());
    let emp001 = report.records.get("EMP001").unwrap();
    let emp002 = report.records.get("EMP002").unwrap();

    let final_emp001 = emp001.day_blocks(RecordTag::DayBlockFinalThird).unwrap();
    assert_eq!(final_emp001.period_label, PeriodLabel::FinalThirtyOne);
    assert_eq!(final_emp001.day_records.len(), 11);
    assert_eq!(emp002.day_blocks(RecordTag::DayBlockFinalThird).unwrap().day_records.len(), 10);

    let calendar = decode_slim(&DecoderConfig {
        final_period: FinalPeriod::Calendar,
        ..DecoderConfig::default()
    });
    let label = |key: &str| {
        calendar
            .records
            .get(key)
            .unwrap()
            .day_blocks(RecordTag::DayBlockFinalThird)
            .unwrap()
            .period_label
    };
    assert_eq!(label("EMP001"), PeriodLabel::FinalThirtyOne);
    assert_eq!(label("EMP002"), PeriodLabel::FinalThirty);
}

#[test]
fn test_slim_dataset_tag_selection() {
    let report = decode_slim(&DecoderConfig {
        record_tags: vec![RecordTag::DayBlockSecondThird],
        ..DecoderConfig::default()
    });

    assert_eq!(report.lines_decoded, 2);
    assert_eq!(report.lines_filtered, 6);
    let group = report.records.get("EMP002").unwrap();
    assert_eq!(group.tags().collect::<Vec<_>>(), vec![RecordTag::DayBlockSecondThird]);
}

#[test]
fn test_full_dataset_decodes_every_key() {
    let lines = read_lines("./data/mock/data.csv").unwrap();
    let report = decode_lines(lines, &DecoderConfig::default()).unwrap();

    assert!(report.errors.is_empty());
    assert_eq!(report.records.len(), 20);
    assert!(report.records.iter().all(|(_, group)| group.len() == 4));
}

#[test]
fn test_raw_rows_grouped_by_key() {
    let lines = read_lines(SLIM_DATASET).unwrap();
    let index = group_rows(&lines, &[RecordTag::Header, RecordTag::DayBlockFinalThird]);

    assert_eq!(index.len(), 2);
    assert_eq!(index["EMP001"][&RecordTag::Header].line, 1);
    assert_eq!(index["EMP002"][&RecordTag::DayBlockFinalThird].line, 8);
    assert!(!index["EMP001"].contains_key(&RecordTag::DayBlockFirstThird));
}

// =============================================================================
// Aggregation and error policies
// =============================================================================

#[test]
fn test_header_and_day_blocks_end_to_end() {
    let mut header = vec!["K2", "EMP001", "D01", "C01", "S09", "202401", "0101-0131", "SRC", "派遣先"];
    header.resize(26, "");
    let text = format!(
        "A1:EMP001:{}\nA2:EMP001:K2:1:0:月:0:540:1080:60::480:0:0:0:2:0:火:0:540:1080:60::480:0:0:0\n",
        header.join(":")
    );

    let report = decode_lines(lines_from_str(&text), &DecoderConfig::default()).unwrap();
    let group = report.records.get("EMP001").unwrap();

    let header = group.header().unwrap();
    assert!(header.length_valid);
    assert_eq!(header.record.dispatch_name, "派遣先");
    assert_eq!(header.record.reserved_10.as_deref(), Some(""));

    let blocks = group.day_blocks(RecordTag::DayBlockFirstThird).unwrap();
    let weekdays: Vec<&str> = blocks.day_records.iter().map(|d| d.day_of_week.as_str()).collect();
    assert_eq!(weekdays, vec!["月", "火"]);
    assert_eq!(blocks.day_records[0].day, "1");
    assert_eq!(blocks.day_records[1].day, "2");
}

#[test]
fn test_last_write_wins_for_same_key_and_tag() {
    let text = "\
A2:EMP001:K2:1:0:月:0:540:1080:60::480:0:0:5
A2:EMP001:K2:1:0:月:0:540:1080:60::420:0:0:9
";
    let report = decode_lines(lines_from_str(text), &DecoderConfig::default()).unwrap();
    let blocks = report
        .records
        .get("EMP001")
        .unwrap()
        .day_blocks(RecordTag::DayBlockFirstThird)
        .unwrap();

    assert_eq!(blocks.line_number, 2);
    assert_eq!(blocks.day_records.len(), 1);
    assert_eq!(blocks.day_records[0].work_time_mins, 420);
    assert_eq!(blocks.day_records[0].work_late_overtime_mins, 9);
}

#[test]
fn test_error_policies() {
    let text = "A1:EMP001:K2:EMP001\nA2:EMP001:K2:1:x:月:0:540:1080:60::480:0:0:0\nA3:EMP001:K2:11:0:木:0:0:0:0::0:0:0:0\n";

    let report = decode_lines(lines_from_str(text), &DecoderConfig::default()).unwrap();
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].line_number, 1);
    assert!(matches!(report.errors[0].error, DecodeError::SchemaMismatch { .. }));
    assert_eq!(
        report.errors[1].error,
        DecodeError::InvalidField {
            field: "reserved_2".to_string(),
            value: "x".to_string(),
        }
    );
    assert_eq!(report.records.get("EMP001").unwrap().len(), 1);

    let abort = DecoderConfig {
        error_policy: ErrorPolicy::Abort,
        ..DecoderConfig::default()
    };
    let error = decode_lines(lines_from_str(text), &abort).unwrap_err();
    assert_eq!(error.line_number, 1);
    assert_eq!(error.raw_text, "A1:EMP001:K2:EMP001");
}

// =============================================================================
// HTTP surface
// =============================================================================

#[tokio::test]
async fn test_http_decode_slim_dataset() {
    let text = std::fs::read_to_string(SLIM_DATASET).unwrap();
    let (status, body) = post_decode(create_router_for_test(), json!({ "text": text })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lines_decoded"], 8);
    assert_eq!(body["records"]["EMP001"]["A1"]["record"]["staff_id"], "STAFF9");
    assert_eq!(body["records"]["EMP001"]["A3"]["period_label"], "11_20");
    assert_eq!(body["records"]["EMP001"]["A4"]["period_label"], "21_31");
    assert_eq!(
        body["records"]["EMP001"]["A2"]["day_records"][2]["notes"],
        "電車遅延15分"
    );
}

#[tokio::test]
async fn test_http_decode_with_options() {
    let text = std::fs::read_to_string(SLIM_DATASET).unwrap();
    let body = json!({
        "text": text,
        "options": { "final_period": "thirty", "record_tags": ["A4"] }
    });
    let (status, body) = post_decode(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lines_filtered"], 6);
    assert_eq!(body["records"]["EMP002"]["A4"]["period_label"], "21_30");
    assert!(body["records"]["EMP002"].get("A1").is_none());
}

#[tokio::test]
async fn test_http_abort_returns_unprocessable() {
    let body = json!({
        "text": "A2:EMP001:K2:1:0:月:0:x:1080:60::480:0:0:0",
        "options": { "error_policy": "abort" }
    });
    let (status, body) = post_decode(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_FIELD");
}

#[tokio::test]
async fn test_http_unknown_option_value_returns_400() {
    let body = json!({ "text": "", "options": { "final_period": "twenty" } });
    let (status, body) = post_decode(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}
