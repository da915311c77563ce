mod common;

use amocrm::{AmoCrmError, Grant};
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{exchanger, exchanger_with, form_fields, slow_provider, token_body};

#[tokio::test]
async fn test_exchange_code_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header("user-agent", "amocrm-rs"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=the-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-1", "refresh-1", 86400)))
        .expect(1)
        .mount(&server)
        .await;

    let before = Utc::now();
    let token = exchanger(&server).exchange_code("the-code").await.unwrap();
    let after = Utc::now();

    assert_eq!(token.access_token(), "access-1");
    assert_eq!(token.refresh_token(), "refresh-1");
    assert_eq!(token.token_type(), "Bearer");
    assert!(!token.is_expired());

    let expires_at = token.expires_at().unwrap();
    assert!(expires_at >= before + Duration::seconds(86400));
    assert!(expires_at <= after + Duration::seconds(86400));

    let requests = server.received_requests().await.unwrap();
    let fields = form_fields(&requests[0].body);
    assert_eq!(
        fields,
        vec![
            ("client_id".to_string(), "client_id".to_string()),
            ("client_secret".to_string(), "client_secret".to_string()),
            ("redirect_uri".to_string(), "https://example.com/callback".to_string()),
            ("grant_type".to_string(), "authorization_code".to_string()),
            ("code".to_string(), "the-code".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_refresh_token_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=old-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access-2", "refresh-2", 3600)))
        .expect(1)
        .mount(&server)
        .await;

    let token = exchanger(&server).refresh_token("old-refresh").await.unwrap();
    assert_eq!(token.access_token(), "access-2");
    assert_eq!(token.refresh_token(), "refresh-2");
}

#[tokio::test]
async fn test_reserved_form_fields_are_not_overridden() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access", "refresh", 60)))
        .mount(&server)
        .await;

    exchanger(&server)
        .exchange(
            Grant::AuthorizationCode,
            &[
                ("code", "c"),
                ("client_id", "forged"),
                ("grant_type", "password"),
                ("state", "extra"),
            ],
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let fields = form_fields(&requests[0].body);

    let values = |key: &str| -> Vec<String> {
        fields.iter().filter(|(k, _)| k == key).map(|(_, v)| v.clone()).collect()
    };
    assert_eq!(values("client_id"), vec!["client_id".to_string()]);
    assert_eq!(values("grant_type"), vec!["authorization_code".to_string()]);
    assert_eq!(values("state"), vec!["extra".to_string()]);
}

#[tokio::test]
async fn test_non_success_status_keeps_body() {
    let server = MockServer::start().await;

    let body = r#"{"title":"Bad Request","hint":"Authorization code has expired","status":400}"#;
    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(body))
        .mount(&server)
        .await;

    let result = exchanger(&server).exchange_code("expired").await;
    match result {
        Err(AmoCrmError::TokenRequestFailed { status, body: received }) => {
            assert_eq!(status, 400);
            assert_eq!(received, body);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_token_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = exchanger(&server).exchange_code("code").await;
    assert!(matches!(result, Err(AmoCrmError::MalformedTokenResponse(_))));
}

#[tokio::test]
async fn test_missing_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("", "refresh", 3600)))
        .mount(&server)
        .await;

    let result = exchanger(&server).refresh_token("refresh").await;
    assert!(matches!(result, Err(AmoCrmError::MissingAccessToken)));
}

#[tokio::test]
async fn test_token_response_body_is_capped() {
    let server = MockServer::start().await;

    let oversized = "x".repeat(2 << 20);
    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .respond_with(ResponseTemplate::new(500).set_body_string(oversized))
        .mount(&server)
        .await;

    let result = exchanger(&server).exchange_code("code").await;
    match result {
        Err(AmoCrmError::TokenRequestFailed { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body.len(), 1 << 20);
        }
        other => panic!("unexpected result: {:?}", other.map(|t| t.access_token().to_string())),
    }
}

#[tokio::test]
async fn test_validation_errors_make_no_requests() {
    let server = MockServer::start().await;
    let exchanger = exchanger(&server);

    assert!(matches!(exchanger.exchange_code("").await, Err(AmoCrmError::EmptyCode)));
    assert!(matches!(
        exchanger.refresh_token("").await,
        Err(AmoCrmError::EmptyRefreshToken)
    ));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_timeout_is_transport_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("access", "refresh", 3600))
                .set_delay(StdDuration::from_secs(2)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let exchanger = exchanger_with(&server, slow_provider(&server));
    let result = exchanger.exchange_code("code").await;
    match result {
        Err(AmoCrmError::Transport(error)) => assert!(error.is_timeout()),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_domain_with_url_delimiters_never_leaves_the_account() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access", "refresh", 3600)))
        .expect(0)
        .mount(&server)
        .await;

    for domain in ["localhost#.amocrm.ru", "2130706433?.amocrm.ru", "evil@x.amocrm.ru"] {
        let mut exchanger = exchanger(&server);
        exchanger.set_domain(domain).unwrap();

        assert!(matches!(
            exchanger.exchange_code("code").await,
            Err(AmoCrmError::InvalidDomain(_))
        ));
        assert!(matches!(
            exchanger.refresh_token("refresh").await,
            Err(AmoCrmError::InvalidDomain(_))
        ));
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}
