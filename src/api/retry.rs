//! Retrying requests the router rejects with `401 Unauthorized`.
//!
//! Some firmwares randomly reject valid credentials and accept them again on
//! the very next request, so rejected attempts are repeated as-is.

use std::future::Future;

use reqwest::StatusCode;

use super::FetchError;

/// Outcome of a single request that didn't fail outright.
#[derive(Debug, PartialEq, Eq)]
pub enum Attempt<T> {
    Accepted(T),
    Unauthorized,
}

/// Only `200 OK` is accepted, `401` may be retried, everything else is fatal.
pub fn check_status(status: StatusCode) -> Result<Attempt<()>, FetchError> {
    match status {
        StatusCode::OK => Ok(Attempt::Accepted(())),
        StatusCode::UNAUTHORIZED => Ok(Attempt::Unauthorized),
        status => Err(FetchError::Status(status.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthRetry {
    /// Rejections tolerated before giving up
    retries: u32,
}

impl AuthRetry {
    pub fn new(retries: u32) -> AuthRetry {
        AuthRetry { retries }
    }

    /// Run `attempt` until it's accepted, fails, or got rejected more than
    /// `retries` times. `attempt` gets the 1-based attempt number.
    ///
    /// No delay between attempts.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> Result<T, FetchError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Attempt<T>, FetchError>>,
    {
        let mut rejected = 0u32;
        loop {
            match attempt(rejected + 1).await? {
                Attempt::Accepted(value) => return Ok(value),
                Attempt::Unauthorized => {
                    rejected += 1;
                    if rejected > self.retries {
                        return Err(FetchError::AuthExhausted { attempts: rejected });
                    }
                    log::warn!("credentials rejected (attempt {}), trying again", rejected);
                }
            }
        }
    }
}
