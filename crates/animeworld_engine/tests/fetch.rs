use std::time::Duration;

use animeworld_engine::{FailureKind, FetchRequest, FetchSettings, Fetcher, ReqwestFetcher};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetcher_returns_body_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let url = format!("{}/doc", server.uri());

    let output = fetcher.fetch(&FetchRequest::get(&url)).await.expect("fetch ok");
    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, output.metadata.original_url);
    assert_eq!(output.metadata.status, 200);
    assert!(output
        .metadata
        .content_type
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(output.bytes, b"<html>ok</html>");
}

#[tokio::test]
async fn fetcher_sends_method_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ajax"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .and(body_string("action=ping&term=a+b"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let mut request = FetchRequest::post(format!("{}/ajax", server.uri()), "action=ping&term=a+b");
    request
        .headers
        .push(("X-Requested-With".into(), "XMLHttpRequest".into()));

    let output = fetcher.fetch(&request).await.expect("post ok");
    assert_eq!(output.bytes, b"pong");
}

#[tokio::test]
async fn missing_pages_are_classified_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();

    let err = fetcher
        .fetch(&FetchRequest::get(format!("{}/missing", server.uri())))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert!(err.is_not_found());

    let err = fetcher
        .fetch(&FetchRequest::get(format!("{}/broken", server.uri())))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn per_request_timeout_overrides_settings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let mut request = FetchRequest::get(format!("{}/slow", server.uri()));
    request.timeout = Some(Duration::from_millis(50));

    let err = fetcher.fetch(&request).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings).unwrap();

    let err = fetcher
        .fetch(&FetchRequest::get(format!("{}/large", server.uri())))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn malformed_urls_fail_before_sending() {
    let fetcher = ReqwestFetcher::new(FetchSettings::default()).unwrap();
    let err = fetcher
        .fetch(&FetchRequest::get("not a url"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
