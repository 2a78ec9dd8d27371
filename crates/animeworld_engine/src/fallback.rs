use std::future::Future;

use animeworld_logging::aw_debug;

use crate::ScrapeError;

/// Ordered candidates tried one at a time until one yields a value.
///
/// An attempt returns `Ok(Some(_))` on success, `Ok(None)` to move on without
/// recording a failure, or `Err(_)` to move on remembering the failure. When
/// every candidate is spent the chain fails with `ScrapeError::Exhausted`
/// carrying the last recorded failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    target: String,
    candidates: Vec<String>,
}

enum State<T> {
    Trying(usize),
    Succeeded(T),
    Exhausted,
}

impl FallbackChain {
    pub fn new(target: impl Into<String>, candidates: Vec<String>) -> Self {
        Self {
            target: target.into(),
            candidates,
        }
    }

    pub async fn run<T, F, Fut>(self, mut attempt: F) -> Result<T, ScrapeError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<Option<T>, ScrapeError>>,
    {
        let mut last_failure: Option<ScrapeError> = None;
        let mut state = State::Trying(0);
        loop {
            state = match state {
                State::Trying(index) => match self.candidates.get(index) {
                    None => State::Exhausted,
                    Some(candidate) => match attempt(candidate.clone()).await {
                        Ok(Some(value)) => State::Succeeded(value),
                        Ok(None) => {
                            aw_debug!("{}: {} yielded nothing", self.target, candidate);
                            State::Trying(index + 1)
                        }
                        Err(err) => {
                            aw_debug!("{}: {} failed: {}", self.target, candidate, err);
                            last_failure = Some(err);
                            State::Trying(index + 1)
                        }
                    },
                },
                State::Succeeded(value) => return Ok(value),
                State::Exhausted => {
                    return Err(ScrapeError::Exhausted {
                        target: self.target,
                        attempts: self.candidates.len(),
                        last: last_failure.map(Box::new),
                    })
                }
            };
        }
    }
}
