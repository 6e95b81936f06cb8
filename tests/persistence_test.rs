#![cfg(feature = "storage-rocksdb")]

mod common;

use assert_cmd::cargo_bin;
use common::DataDir;
use serde_json::json;
use std::path::PathBuf;
use std::process::Command;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn purchase(data_dir: PathBuf, db_path: PathBuf) -> serde_json::Value {
    let output = Command::new(cargo_bin!("shop-payment-gateways"))
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--db-path")
        .arg(db_path)
        .args(["purchase", "--gateway", "mangopay", "--tenant", "acme"])
        .args(["--amount", "15", "--currency", "EUR"])
        .args(["--customer-email", "jane@example.com"])
        .args(["--customer-first-name", "Jane", "--customer-last-name", "Doe"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rocksdb_persistence_recovery() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.01/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.01/shop/users/natural"))
        .and(body_string_contains("jane@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Id": "101"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.01/shop/users/natural"))
        .and(body_string_contains("owner@acme.example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Id": "202"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let data_dir = DataDir::new();
    data_dir.write_global(
        "mangopay",
        &format!(
            "clientId: shop\nclientPassword: s3cr3t\nbaseUrl: {}\n",
            mock_server.uri()
        ),
    );
    data_dir.write_tenant(
        "acme",
        "mangopay",
        "beneficiary:\n  email: owner@acme.example\n  firstName: Ada\n  lastName: Owner\n  birthday: 1984-03-02\n",
    );
    let db_path = data_dir.path().join("gateway_db");

    // 1. First run creates both MangoPay users and records them
    let (dir, db) = (data_dir.path().to_path_buf(), db_path.clone());
    let first = tokio::task::spawn_blocking(move || purchase(dir, db))
        .await
        .unwrap();
    assert_eq!(first["operation"]["memo"]["customerUserId"], "101");
    assert_eq!(first["operation"]["memo"]["tenantUserId"], "202");

    // 2. Second run finds them in the database, without calling MangoPay
    let (dir, db) = (data_dir.path().to_path_buf(), db_path);
    let second = tokio::task::spawn_blocking(move || purchase(dir, db))
        .await
        .unwrap();
    assert_eq!(second["operation"]["memo"], first["operation"]["memo"]);
}
