use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use animeworld_engine::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, FetchRequest, Fetcher, FixedUserAgent,
    HttpMethod, RequestOptions, RotatingUserAgents, SiteClient,
};
use pretty_assertions::assert_eq;

/// Replays scripted outcomes and records every request it sees.
#[derive(Default)]
struct ScriptedFetcher {
    outcomes: Mutex<VecDeque<Result<&'static str, FetchError>>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl ScriptedFetcher {
    fn new(outcomes: Vec<Result<&'static str, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchOutput, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::new(FailureKind::Network, "script exhausted")));
        outcome.map(|body| FetchOutput {
            bytes: body.as_bytes().to_vec(),
            metadata: FetchMetadata {
                original_url: request.url.clone(),
                final_url: request.url.clone(),
                status: 200,
                content_type: Some("text/html; charset=utf-8".into()),
                byte_len: body.len() as u64,
            },
        })
    }
}

fn network_error(n: u32) -> FetchError {
    FetchError::new(FailureKind::Network, format!("connection reset #{n}"))
}

fn client_over(fetcher: Arc<ScriptedFetcher>) -> SiteClient {
    SiteClient::new(fetcher, Arc::new(FixedUserAgent("test-agent/1.0".into())))
}

fn two_quick_retries() -> RequestOptions {
    RequestOptions::default().retries(2, Duration::from_millis(1))
}

#[tokio::test]
async fn get_recovers_after_two_failures_with_two_retries() {
    animeworld_logging::initialize_for_tests();
    let fetcher = ScriptedFetcher::new(vec![
        Err(network_error(1)),
        Err(network_error(2)),
        Ok("<p>third time lucky</p>"),
    ]);
    let client = client_over(fetcher.clone());

    let body = client
        .get("https://site.test/page/", &two_quick_retries())
        .await
        .expect("retries recover");
    assert_eq!(body, "<p>third time lucky</p>");
    assert_eq!(fetcher.requests().len(), 3);
}

#[tokio::test]
async fn third_failure_propagates_with_two_retries() {
    let fetcher = ScriptedFetcher::new(vec![
        Err(network_error(1)),
        Err(network_error(2)),
        Err(network_error(3)),
        Ok("never reached"),
    ]);
    let client = client_over(fetcher.clone());

    let err = client
        .get("https://site.test/page/", &two_quick_retries())
        .await
        .unwrap_err();
    assert_eq!(err.message, "connection reset #3");
    assert_eq!(fetcher.requests().len(), 3);
}

#[tokio::test]
async fn no_retries_by_default() {
    let fetcher = ScriptedFetcher::new(vec![Err(network_error(1)), Ok("late")]);
    let client = client_over(fetcher.clone());

    let err = client
        .get("https://site.test/", &RequestOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.message, "connection reset #1");
    assert_eq!(fetcher.requests().len(), 1);
}

#[tokio::test]
async fn post_retries_like_get() {
    let fetcher = ScriptedFetcher::new(vec![Err(network_error(1)), Ok("ok")]);
    let client = client_over(fetcher.clone());

    let body = client
        .post("https://site.test/ajax", "a=1", &two_quick_retries())
        .await
        .unwrap();
    assert_eq!(body, "ok");

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|r| r.method == HttpMethod::Post && r.body.as_deref() == Some("a=1")));
}

#[tokio::test]
async fn buffer_fetch_is_never_retried() {
    let fetcher = ScriptedFetcher::new(vec![Err(network_error(1)), Ok("bytes")]);
    let client = client_over(fetcher.clone());

    let err = client
        .get_buffer("https://site.test/img.jpg", &two_quick_retries())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert_eq!(fetcher.requests().len(), 1);

    let bytes = client
        .get_buffer("https://site.test/img.jpg", &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"bytes");
}

#[tokio::test]
async fn defaults_identity_and_overrides_are_merged() {
    let fetcher = ScriptedFetcher::new(vec![Ok("a"), Ok("b")]);
    let client = client_over(fetcher.clone());

    client
        .get("https://site.test/", &RequestOptions::default())
        .await
        .unwrap();
    let options = RequestOptions::default()
        .header("accept", "*/*")
        .header("Referer", "https://site.test/series/x/");
    client.get("https://site.test/ajax", &options).await.unwrap();

    let requests = fetcher.requests();
    let plain = &requests[0];
    assert_eq!(plain.header("User-Agent"), Some("test-agent/1.0"));
    assert!(plain.header("Accept").unwrap().starts_with("text/html"));
    assert_eq!(plain.header("Accept-Language"), Some("en-US,en;q=0.9"));
    assert_eq!(plain.header("Referer"), None);

    let ajax = &requests[1];
    assert_eq!(ajax.header("Accept"), Some("*/*"));
    assert_eq!(ajax.header("Referer"), Some("https://site.test/series/x/"));
    let accept_headers = ajax
        .headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case("accept"))
        .count();
    assert_eq!(accept_headers, 1);
}

#[tokio::test]
async fn each_call_draws_a_fresh_identity() {
    let fetcher = ScriptedFetcher::new(vec![Ok("1"), Ok("2"), Ok("3")]);
    let agents = RotatingUserAgents::new(vec!["ua-one".into(), "ua-two".into()]);
    let client = SiteClient::new(fetcher.clone(), Arc::new(agents));

    for _ in 0..3 {
        client
            .get("https://site.test/", &RequestOptions::default())
            .await
            .unwrap();
    }

    let seen: Vec<String> = fetcher
        .requests()
        .iter()
        .map(|r| r.header("User-Agent").unwrap_or_default().to_string())
        .collect();
    assert_eq!(seen, ["ua-one", "ua-two", "ua-one"]);
}

#[tokio::test]
async fn client_defaults_seed_options() {
    let fetcher = ScriptedFetcher::new(vec![Err(network_error(1)), Ok("ok")]);
    let client = client_over(fetcher.clone()).with_defaults(two_quick_retries());

    let body = client.get("https://site.test/", &client.options()).await.unwrap();
    assert_eq!(body, "ok");
    assert_eq!(fetcher.requests().len(), 2);
}
