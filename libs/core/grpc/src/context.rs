//! Per-call deadline, cancellation and metadata.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tonic::metadata::MetadataMap;
use tonic::{Extensions, Request, Status};

/// Context carried by every stub call.
///
/// Decorators hand the caller's context to their child untouched; only the
/// transport stub acts on it, through [`CallContext::request`] and
/// [`CallContext::run`]. Clones share the cancellation token, so cancelling a
/// clone cancels the call.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancellation: CancellationToken,
    metadata: MetadataMap,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Tie the call to an externally owned token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn with_metadata(mut self, metadata: MetadataMap) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut MetadataMap {
        &mut self.metadata
    }

    /// Build the outgoing request: caller metadata plus a `grpc-timeout`
    /// derived from the remaining time.
    pub fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::from_parts(self.metadata.clone(), Extensions::default(), message);
        if let Some(remaining) = self.remaining() {
            request.set_timeout(remaining);
        }
        request
    }

    /// Drive `call` while honoring the deadline and the cancellation token.
    ///
    /// A context that is already cancelled or past its deadline fails without
    /// polling `call`.
    pub async fn run<T, F>(&self, call: F) -> Result<T, Status>
    where
        F: Future<Output = Result<T, Status>>,
    {
        if self.is_cancelled() {
            return Err(Status::cancelled("call cancelled before it was issued"));
        }
        let deadline = self.deadline;
        if deadline.is_some_and(|deadline| deadline <= Instant::now()) {
            return Err(Status::deadline_exceeded(
                "deadline expired before the call was issued",
            ));
        }

        let bounded = async move {
            match deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, call)
                    .await
                    .unwrap_or_else(|_| Err(Status::deadline_exceeded("deadline exceeded"))),
                None => call.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(Status::cancelled("call cancelled")),
            result = bounded => result,
        }
    }
}
