//! Request-scoped context threaded through services and repositories

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Carries the request identifier and the cancellation signal of one inbound request.
///
/// Passed explicitly by reference into every service and repository call so
/// log records can be tagged with the request id where they are emitted.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Cancel the request once `timeout` has elapsed from now
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Tie the request to an externally owned cancellation token
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Resolves when the request is cancelled or its deadline passes
    pub async fn cancelled(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => {}
                    _ = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => self.token.cancelled().await,
        }
    }
}
