//! End-to-end behavior of `check_block` against a mock endpoint.

use std::time::Duration;

use abusewatch_client::{AbuseClient, AbuseError, RetryConfig, RoundRobinSelector};
use chrono::{Duration as ChronoDuration, Utc};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str, keys: Vec<String>, max_retries: u32) -> AbuseClient {
    AbuseClient::builder(keys)
        .base_url(base_url)
        .timeout(Duration::from_secs(2))
        .retry(
            RetryConfig::default()
                .max_retries(max_retries)
                .backoff_unit(Duration::from_millis(2)),
        )
        .key_selector(RoundRobinSelector::default())
        .build()
}

fn check_block_body(timestamps: &[&str]) -> String {
    let entries: Vec<String> = timestamps
        .iter()
        .enumerate()
        .map(|(i, ts)| {
            format!(
                r#"{{
                    "ipAddress": "203.0.113.{i}",
                    "numReports": {num},
                    "mostRecentReport": "{ts}",
                    "abuseConfidenceScore": 75,
                    "countryCode": "DE"
                }}"#,
                num = i + 1,
            )
        })
        .collect();

    format!(
        r#"{{
            "data": {{
                "networkAddress": "203.0.113.0",
                "netmask": "255.255.255.0",
                "minAddress": "203.0.113.0",
                "maxAddress": "203.0.113.255",
                "numPossibleHosts": 254,
                "addressSpaceDesc": "Internet routable",
                "reportedAddress": [{}]
            }}
        }}"#,
        entries.join(",")
    )
}

#[tokio::test]
async fn success_filters_to_recent_rows() {
    let server = MockServer::start().await;
    let now = Utc::now();

    let recent = (now - ChronoDuration::hours(2)).to_rfc3339();
    let stale = (now - ChronoDuration::days(30)).to_rfc3339();
    let body = check_block_body(&[&recent, &stale, ""]);

    Mock::given(method("GET"))
        .and(path("/api/v2/check-block"))
        .and(query_param("network", "203.0.113.0/24"))
        .and(query_param("maxAgeInDays", "7"))
        .and(header("Accept", "application/json"))
        .and(header("Key", "key-a"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), vec!["key-a".into()], 3);
    let rows = client.check_block("203.0.113.0/24").await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ip_address, "203.0.113.0");
    assert_eq!(rows[0].country_code, "DE");
    assert_eq!(rows[0].abuse_confidence_score, 75);
}

#[tokio::test]
async fn unauthorized_rotates_keys_until_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/check-block"))
        .respond_with(ResponseTemplate::new(401))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), vec!["key-a".into(), "key-b".into()], 3);
    let started = std::time::Instant::now();
    let err = client.check_block("198.51.100.0/24").await.unwrap_err();

    // Linear backoff between 3 attempts: 1 unit after the first, 2 after the
    // second, none after the last.
    assert!(started.elapsed() >= Duration::from_millis(2) * 3);

    match err {
        AbuseError::UnauthorizedExhausted { network, attempts } => {
            assert_eq!(network, "198.51.100.0/24");
            assert_eq!(attempts, 3);
        }
        other => panic!("expected UnauthorizedExhausted, got {other:?}"),
    }

    // Round-robin selection means each attempt presented the next key.
    let requests = server.received_requests().await.unwrap();
    let keys: Vec<&str> = requests
        .iter()
        .map(|r| r.headers.get("Key").unwrap().to_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["key-a", "key-b", "key-a"]);
}

#[tokio::test]
async fn server_error_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/check-block"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), vec!["key-a".into()], 3);
    let err = client.check_block("203.0.113.0/24").await.unwrap_err();

    match err {
        AbuseError::Api { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_fails_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/check-block"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), vec!["key-a".into()], 3);
    let err = client.check_block("203.0.113.0/24").await.unwrap_err();

    assert!(matches!(err, AbuseError::Json(_)), "got {err:?}");
}

#[tokio::test]
async fn empty_key_set_fails_immediately() {
    let server = MockServer::start().await;

    let client = test_client(&server.uri(), vec![], 3);
    let err = client.check_block("203.0.113.0/24").await.unwrap_err();

    assert!(matches!(err, AbuseError::NoApiKeys), "got {err:?}");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn transport_errors_exhaust_retries() {
    // Nothing listens here; every attempt is refused.
    let client = test_client("http://127.0.0.1:9", vec!["key-a".into()], 3);
    let started = std::time::Instant::now();
    let err = client.check_block("203.0.113.0/24").await.unwrap_err();

    match err {
        AbuseError::RetriesExhausted { network, attempts, .. } => {
            assert_eq!(network, "203.0.113.0/24");
            assert_eq!(attempts, 3);
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }

    // The backoff slept at least 1 + 2 units across the failed attempts.
    assert!(started.elapsed() >= Duration::from_millis(2) * 3);
}
