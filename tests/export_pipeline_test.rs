//! End-to-end export tests: YAML config, mock API, local output directory

use chrono::NaiveDate;
use hotelfeed::config::Settings;
use hotelfeed::core::export::{ExportCoordinator, ExportErrorType};
use hotelfeed::domain::FeedError;
use mockito::Matcher;
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

fn write_config(dir: &Path, extra: &str) -> std::path::PathBuf {
    let out = dir.join("out");
    let yaml = format!(
        r#"
datasets:
  reservations:
    fields: [reservation_id, status]
  sales:
    fields: [reservation_id, amount]
  rooms:
    fields: [room_id, status]
output:
  format: csv
  local_output:
    enabled: true
    directory: "{}"
{extra}
"#,
        out.display()
    );
    let path = dir.join("config.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

#[tokio::test]
async fn test_failed_operation_is_isolated() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/reservations")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"reservation_id": "R1", "status": "in", "guest": "Ann"}]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/sales")
        .match_query(Matcher::UrlEncoded("start_date".into(), "2024-01-08".into()))
        .with_status(200)
        .with_body(r#"{"data": [{"reservation_id": "R1", "amount": 99.5}]}"#)
        .create_async()
        .await;
    let failing = server
        .mock("GET", "/sales")
        .match_query(Matcher::UrlEncoded("start_date".into(), "2024-01-09".into()))
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;
    server
        .mock("GET", "/rooms")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"room_id": 101, "status": "clean"}]"#)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), "");
    let settings = Settings::load_with(
        &config_path,
        env(&[
            ("API_BASE_URL", server.url().as_str()),
            ("API_TOKEN", "secret"),
            ("API_TOKEN_HEADER", "Authorization"),
        ]),
    )
    .unwrap();

    let summary = ExportCoordinator::new(settings)
        .await
        .unwrap()
        .with_today(today())
        .execute_export()
        .await
        .unwrap();

    failing.assert_async().await;
    assert_eq!(summary.total_operations(), 6);
    assert_eq!(summary.failed_operations(), 1);
    assert_eq!(summary.exit_code(), 1);

    let failed = summary
        .operations
        .iter()
        .find(|op| !op.is_successful())
        .unwrap();
    assert_eq!(failed.artifact, "sales_onhand");
    assert_eq!(failed.error.as_ref().unwrap().error_type, ExportErrorType::Api);

    let out = dir.path().join("out");
    for name in [
        "reservations_history",
        "reservations_onhand",
        "sales_history",
        "rooms_history",
        "rooms_onhand",
    ] {
        assert!(out.join(format!("{name}.csv")).exists(), "{name} missing");
    }
    assert!(!out.join("sales_onhand.csv").exists());

    assert_eq!(
        std::fs::read_to_string(out.join("reservations_history.csv")).unwrap(),
        "reservation_id,status\nR1,in\n"
    );
    assert_eq!(
        std::fs::read_to_string(out.join("sales_history.csv")).unwrap(),
        "reservation_id,amount\nR1,99.5\n"
    );
    assert_eq!(
        std::fs::read_to_string(out.join("rooms_onhand.csv")).unwrap(),
        "room_id,status\n101,clean\n"
    );
}

#[tokio::test]
async fn test_json_output() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"status": "clean", "room_id": 7}]"#)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), "");
    let settings = Settings::load_with(
        &config_path,
        env(&[
            ("API_BASE_URL", server.url().as_str()),
            ("API_TOKEN", "secret"),
            ("API_TOKEN_HEADER", "Authorization"),
            ("HOTELFEED_OUTPUT_FORMAT", "json"),
        ]),
    )
    .unwrap();

    let summary = ExportCoordinator::new(settings)
        .await
        .unwrap()
        .with_today(today())
        .execute_export()
        .await
        .unwrap();
    assert!(summary.is_successful());

    let json = std::fs::read_to_string(dir.path().join("out/rooms_history.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, serde_json::json!([{"room_id": 7, "status": "clean"}]));
    assert!(json.find("room_id").unwrap() < json.find("status").unwrap());
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .expect(0)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), "");
    let result = Settings::load_with(
        &config_path,
        env(&[
            ("API_BASE_URL", server.url().as_str()),
            ("API_TOKEN_HEADER", "Authorization"),
        ]),
    );

    match result {
        Err(FeedError::Configuration(message)) => assert!(message.contains("API_TOKEN")),
        other => panic!("expected configuration error, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_manual_window_is_used_for_requests() {
    let mut server = mockito::Server::new_async().await;
    let history = server
        .mock("GET", Matcher::Any)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("start_date".into(), "2023-12-01".into()),
            Matcher::UrlEncoded("end_date".into(), "2023-12-31".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .expect(3)
        .create_async()
        .await;
    server
        .mock("GET", Matcher::Any)
        .match_query(Matcher::UrlEncoded("start_date".into(), "2024-01-09".into()))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_config(
        dir.path(),
        r#"date_ranges:
  manual:
    history:
      start: 2023-12-01
      end: 2023-12-31
"#,
    );
    let settings = Settings::load_with(
        &config_path,
        env(&[
            ("API_BASE_URL", server.url().as_str()),
            ("API_TOKEN", "secret"),
            ("API_TOKEN_HEADER", "Authorization"),
        ]),
    )
    .unwrap();

    let summary = ExportCoordinator::new(settings)
        .await
        .unwrap()
        .with_today(today())
        .execute_export()
        .await
        .unwrap();

    history.assert_async().await;
    assert!(summary.is_successful());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("out/sales_history.csv")).unwrap(),
        "reservation_id,amount\n"
    );
}
