use std::sync::Arc;
use std::time::Duration;

use animeworld_logging::{aw_debug, aw_warn};
use bytes::Bytes;

use crate::decode::decode_html;
use crate::{FetchError, FetchOutput, FetchRequest, Fetcher, UserAgentSource};

/// Browser-like headers sent with every request unless overridden.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.9"),
];

const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Per-call knobs. Header overrides replace defaults case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            timeout: None,
            retries: 0,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, name.into(), value.into());
        self
    }

    pub fn retries(mut self, retries: u32, retry_delay: Duration) -> Self {
        self.retries = retries;
        self.retry_delay = retry_delay;
        self
    }
}

/// Document fetcher used by every extractor.
///
/// Cheap to clone; clones share the underlying connection pool and
/// user-agent rotation.
#[derive(Clone)]
pub struct SiteClient {
    fetcher: Arc<dyn Fetcher>,
    user_agents: Arc<dyn UserAgentSource>,
    defaults: RequestOptions,
}

impl SiteClient {
    pub fn new(fetcher: Arc<dyn Fetcher>, user_agents: Arc<dyn UserAgentSource>) -> Self {
        Self {
            fetcher,
            user_agents,
            defaults: RequestOptions::default(),
        }
    }

    /// Retry budget and timeout applied by `options()`.
    pub fn with_defaults(mut self, defaults: RequestOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Fresh options seeded with this client's defaults.
    pub fn options(&self) -> RequestOptions {
        self.defaults.clone()
    }

    pub async fn get(&self, url: &str, options: &RequestOptions) -> Result<String, FetchError> {
        let request = self.build_request(FetchRequest::get(url), options);
        let output = self.send_with_retries(&request, options).await?;
        Ok(decode_body(output))
    }

    pub async fn post(
        &self,
        url: &str,
        body: impl Into<String>,
        options: &RequestOptions,
    ) -> Result<String, FetchError> {
        let request = self.build_request(FetchRequest::post(url, body), options);
        let output = self.send_with_retries(&request, options).await?;
        Ok(decode_body(output))
    }

    /// Raw response bytes, single attempt.
    pub async fn get_buffer(&self, url: &str, options: &RequestOptions) -> Result<Bytes, FetchError> {
        let request = self.build_request(FetchRequest::get(url), options);
        let output = self.fetcher.fetch(&request).await?;
        Ok(Bytes::from(output.bytes))
    }

    fn build_request(&self, mut request: FetchRequest, options: &RequestOptions) -> FetchRequest {
        let mut headers: Vec<(String, String)> = DEFAULT_HEADERS
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        set_header(
            &mut headers,
            "User-Agent".to_string(),
            self.user_agents.next_user_agent(),
        );
        for (name, value) in &options.headers {
            set_header(&mut headers, name.clone(), value.clone());
        }
        request.headers = headers;
        request.timeout = options.timeout;
        request
    }

    async fn send_with_retries(
        &self,
        request: &FetchRequest,
        options: &RequestOptions,
    ) -> Result<FetchOutput, FetchError> {
        let mut attempt: u32 = 0;
        loop {
            match self.fetcher.fetch(request).await {
                Ok(output) => return Ok(output),
                Err(err) if attempt < options.retries => {
                    attempt += 1;
                    aw_warn!(
                        "Request failed, retrying... ({}/{}) {} {}: {}",
                        attempt,
                        options.retries,
                        request.method,
                        request.url,
                        err
                    );
                    tokio::time::sleep(backoff_delay(options.retry_delay, attempt)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Linear backoff; an oversized configured delay saturates instead of
/// overflowing.
fn backoff_delay(retry_delay: Duration, attempt: u32) -> Duration {
    retry_delay.saturating_mul(attempt)
}

fn decode_body(output: FetchOutput) -> String {
    let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
    if decoded.had_errors {
        aw_debug!(
            "Replaced malformed {} sequences in {}",
            decoded.encoding_label,
            output.metadata.final_url
        );
    }
    decoded.html
}

fn set_header(headers: &mut Vec<(String, String)>, name: String, value: String) {
    match headers
        .iter_mut()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
    {
        Some(slot) => *slot = (name, value),
        None => headers.push((name, value)),
    }
}
