use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// One fully-resolved outbound request: headers are already merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Option<std::time::Duration>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            body: Some(body.into()),
            ..Self::get(url)
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// Transport failure of a single request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind.is_not_found()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl FailureKind {
    /// Only an explicit "gone" answer from the site counts as not found.
    /// DNS and connection errors are ordinary network failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FailureKind::HttpStatus(404 | 410))
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failure of an extraction call.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("transport failure: {0}")]
    Transport(#[from] FetchError),
    #[error("parse failure: {0}")]
    Parse(String),
    #[error("no candidate succeeded for {target} after {attempts} attempts")]
    Exhausted {
        target: String,
        attempts: usize,
        #[source]
        last: Option<Box<ScrapeError>>,
    },
}

/// Coarse classification callers map to user-visible responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeErrorKind {
    NotFound,
    Transport,
    Parse,
    Exhausted,
}

impl ScrapeErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScrapeErrorKind::NotFound => "not_found",
            ScrapeErrorKind::Transport => "transport",
            ScrapeErrorKind::Parse => "parse",
            ScrapeErrorKind::Exhausted => "exhausted",
        }
    }
}

impl ScrapeError {
    pub fn parse(message: impl Into<String>) -> Self {
        ScrapeError::Parse(message.into())
    }

    pub fn kind(&self) -> ScrapeErrorKind {
        match self {
            ScrapeError::Transport(err) if err.is_not_found() => ScrapeErrorKind::NotFound,
            ScrapeError::Transport(_) => ScrapeErrorKind::Transport,
            ScrapeError::Parse(_) => ScrapeErrorKind::Parse,
            ScrapeError::Exhausted { .. } => ScrapeErrorKind::Exhausted,
        }
    }

    /// True for a not-found transport failure, or an exhausted chain whose
    /// last attempt was one.
    pub fn is_not_found(&self) -> bool {
        match self {
            ScrapeError::Transport(err) => err.is_not_found(),
            ScrapeError::Exhausted {
                last: Some(last), ..
            } => last.is_not_found(),
            _ => false,
        }
    }

    /// The failure that ended a fallback chain, or `self` for any other error.
    pub fn root_cause(&self) -> &ScrapeError {
        match self {
            ScrapeError::Exhausted {
                last: Some(last), ..
            } => last.root_cause(),
            other => other,
        }
    }
}
