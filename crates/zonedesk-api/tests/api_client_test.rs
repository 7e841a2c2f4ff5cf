#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zonedesk_api::{ApiClient, CreateZoneBody, Error, RecordBody, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn ok(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": message }))
}

fn rejected(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": message }))
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_stores_cookie() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::new(base_url, &TransportConfig::default()).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "username": "alice", "password": "s3cret" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/")
                .set_body_json(json!({ "success": true })),
        )
        .expect(1)
        .mount(&server)
        .await;

    assert!(!client.has_session_cookie());
    let secret: SecretString = "s3cret".to_string().into();
    client.login("alice", &secret).await.unwrap();
    assert!(client.has_session_cookie());
}

#[tokio::test]
async fn test_login_rejected_carries_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(rejected("account disabled"))
        .mount(&server)
        .await;

    let secret: SecretString = "wrong".to_string().into();
    let result = client.login("alice", &secret).await;

    match result {
        Err(Error::Authentication { message }) => assert_eq!(message, "account disabled"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_rejected_without_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let secret: SecretString = "wrong".to_string().into();
    let result = client.login("alice", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { ref message }) if message.is_empty()),
        "expected empty Authentication message, got: {result:?}"
    );
}

#[tokio::test]
async fn test_logout() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ok("bye"))
        .expect(1)
        .mount(&server)
        .await;

    client.logout().await.unwrap();
}

#[tokio::test]
async fn test_change_password_sends_all_three_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/user/change-password"))
        .and(body_json(json!({
            "current_password": "old",
            "new_password": "new",
            "confirm_password": "new"
        })))
        .respond_with(ok("password changed"))
        .expect(1)
        .mount(&server)
        .await;

    let msg = client
        .change_password(
            &"old".to_string().into(),
            &"new".to_string().into(),
            &"new".to_string().into(),
        )
        .await
        .unwrap();
    assert_eq!(msg.as_deref(), Some("password changed"));
}

// ── Zone tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_zones() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "ID": 7,
            "Name": "example.com",
            "UserID": 2,
            "OwnerName": "alice",
            "SOAEmail": "hostmaster@example.com",
            "SOAPrimaryNS": "ns1.example.com",
            "SOARefresh": 7200,
            "SOARetry": 3600,
            "SOAExpire": 1_209_600,
            "SOAMinimum": 3600,
            "Serial": 4,
            "CreatedAt": "2025-01-15T10:30:00.123456+03:00"
        }])))
        .mount(&server)
        .await;

    let zones = client.list_zones().await.unwrap();

    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0].id, 7);
    assert_eq!(zones[0].name, "example.com");
    assert_eq!(zones[0].soa_expire, 1_209_600);
    assert!(zones[0].created_at.is_some());
}

#[tokio::test]
async fn test_create_zone_as_user() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/domains"))
        .and(body_json(json!({
            "name": "example.org",
            "soa_email": "admin@example.org",
            "ip": "192.0.2.10"
        })))
        .respond_with(ok("zone created"))
        .expect(1)
        .mount(&server)
        .await;

    let body = CreateZoneBody::User {
        name: "example.org".into(),
        soa_email: "admin@example.org".into(),
        ip: "192.0.2.10".into(),
    };
    client.create_zone(&body).await.unwrap();
}

#[tokio::test]
async fn test_delete_zone_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/domains/9"))
        .respond_with(rejected("access denied"))
        .mount(&server)
        .await;

    let result = client.delete_zone(9).await;
    match result {
        Err(Error::Rejected { message }) => assert_eq!(message.as_deref(), Some("access denied")),
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

// ── Record tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_records() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/domains/7/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "ID": 1, "DomainID": 7, "Type": "SOA", "Name": "", "Content": "ns1.example.com. hostmaster.example.com. 4 7200 3600 1209600 3600", "Priority": 0, "TTL": 3600 },
            { "ID": 2, "DomainID": 7, "Type": "NS", "Name": "", "Content": "ns1.example.com.", "Priority": 0, "TTL": 3600 },
            { "ID": 5, "DomainID": 7, "Type": "MX", "Name": "", "Content": "mail.example.com.", "Priority": 10, "TTL": 3600 }
        ])))
        .mount(&server)
        .await;

    let records = client.list_records(7).await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].record_type, "SOA");
    assert_eq!(records[2].priority, Some(10));
}

#[tokio::test]
async fn test_list_records_null_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/domains/8/records"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let records = client.list_records(8).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_create_record_returns_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/records"))
        .and(body_json(json!({
            "id": null,
            "domain_id": 7,
            "type": "A",
            "name": "www",
            "content": "1.2.3.4",
            "priority": null,
            "ttl": 3600
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "id": 42, "message": "created" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = RecordBody {
        id: None,
        domain_id: 7,
        record_type: "A".into(),
        name: "www".into(),
        content: "1.2.3.4".into(),
        priority: None,
        ttl: 3600,
    };
    assert_eq!(client.create_record(&body).await.unwrap(), Some(42));
}

#[tokio::test]
async fn test_update_record_uses_put() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/records/42"))
        .respond_with(ok("updated"))
        .expect(1)
        .mount(&server)
        .await;

    let body = RecordBody {
        id: Some(42),
        domain_id: 7,
        record_type: "MX".into(),
        name: String::new(),
        content: "mail.example.com.".into(),
        priority: Some(20),
        ttl: 600,
    };
    client.update_record(42, &body).await.unwrap();
}

#[tokio::test]
async fn test_delete_record() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/records/42"))
        .respond_with(ok("deleted"))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_record(42).await.unwrap();
}

// ── Name-server tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_sync_zone_reports_reload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/nsd/sync/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "reloaded": false,
            "message": "zone written, reload needs sudo"
        })))
        .mount(&server)
        .await;

    let outcome = client.sync_zone(7).await.unwrap();
    assert!(!outcome.reloaded);
    assert_eq!(outcome.message.as_deref(), Some("zone written, reload needs sudo"));
}

#[tokio::test]
async fn test_nsd_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/nsd/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "running": true,
            "permissions": { "zone_dir": true, "reload": false }
        })))
        .mount(&server)
        .await;

    let status = client.nsd_status().await.unwrap();
    assert!(status.running);
    assert_eq!(status.permissions["reload"], json!(false));
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let result = client.list_records(7).await;
    assert!(
        matches!(result, Err(Error::SessionExpired)),
        "expected SessionExpired, got: {result:?}"
    );
}

#[tokio::test]
async fn test_forbidden_admin_route() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/domains/7/records"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden\n"))
        .mount(&server)
        .await;

    let result = client.list_records(7).await;
    match result {
        Err(Error::Forbidden { message }) => assert_eq!(message, "Forbidden"),
        other => panic!("expected Forbidden, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/nsd/sync/7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is locked"))
        .mount(&server)
        .await;

    let result = client.sync_zone(7).await;
    match result {
        Err(Error::Http { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("database is locked"));
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_garbage_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = client.list_zones().await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}
