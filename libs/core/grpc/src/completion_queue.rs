//! Completion of asynchronous stub calls on a caller-owned runtime.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::task::{JoinError, JoinHandle};
use tonic::Status;
use tracing::instrument::WithSubscriber;

use crate::error::{GrpcError, GrpcResult};

/// Where asynchronous stub calls complete.
///
/// Wraps a handle to a runtime owned and driven by the caller; stubs only
/// post work to it. Work carries the caller's tracing dispatcher so log
/// records emitted on completion reach the same sink as the ones emitted
/// when the call was issued.
#[derive(Debug, Clone)]
pub struct CompletionQueue {
    handle: Handle,
}

impl CompletionQueue {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Queue backed by the runtime the caller is running on.
    pub fn from_current() -> GrpcResult<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| GrpcError::InvalidConfig(format!("no runtime for the completion queue: {e}")))
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Schedule `work` and return its handle immediately.
    pub fn spawn<T, F>(&self, work: F) -> PendingCall<T>
    where
        F: Future<Output = Result<T, Status>> + Send + 'static,
        T: Send + 'static,
    {
        PendingCall {
            state: PendingState::Spawned(self.handle.spawn(work.with_current_subscriber())),
        }
    }
}

impl From<Handle> for CompletionQueue {
    fn from(handle: Handle) -> Self {
        Self::new(handle)
    }
}

/// Handle to the result of an asynchronous stub call.
///
/// Dropping it does not cancel the call; cancel through the call's
/// `CallContext` instead.
#[must_use = "a pending call does nothing observable unless awaited"]
pub struct PendingCall<T> {
    state: PendingState<T>,
}

enum PendingState<T> {
    Ready(Option<Result<T, Status>>),
    Spawned(JoinHandle<Result<T, Status>>),
}

impl<T> PendingCall<T> {
    /// An already completed call.
    pub fn ready(result: Result<T, Status>) -> Self {
        Self {
            state: PendingState::Ready(Some(result)),
        }
    }
}

// The result is moved out, never pinned in place.
impl<T> Unpin for PendingCall<T> {}

impl<T> Future for PendingCall<T> {
    type Output = Result<T, Status>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            PendingState::Ready(result) => Poll::Ready(
                result
                    .take()
                    .unwrap_or_else(|| Err(Status::internal("pending call polled after completion"))),
            ),
            PendingState::Spawned(handle) => Pin::new(handle)
                .poll(cx)
                .map(|joined| joined.unwrap_or_else(|e| Err(join_error_status(e)))),
        }
    }
}

fn join_error_status(error: JoinError) -> Status {
    if error.is_cancelled() {
        Status::cancelled("asynchronous call was aborted before completing")
    } else {
        Status::internal(format!("asynchronous call panicked: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ready_call_resolves_immediately() {
        let value = PendingCall::ready(Ok::<_, Status>("done")).await;
        assert_eq!(value.unwrap(), "done");
    }

    #[tokio::test]
    async fn test_spawned_call_completes_on_queue() {
        let cq = CompletionQueue::from_current().unwrap();
        let pending = cq.spawn(async { Ok::<_, Status>(41 + 1) });
        assert_eq!(pending.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_failure_is_passed_through() {
        let cq = CompletionQueue::from_current().unwrap();
        let status = cq
            .spawn(async { Err::<(), _>(Status::permission_denied("nope")) })
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::PermissionDenied);
    }

    #[tokio::test]
    async fn test_panicking_work_becomes_internal() {
        let cq = CompletionQueue::from_current().unwrap();
        let status = cq
            .spawn(async {
                if true {
                    panic!("boom");
                }
                Ok::<(), Status>(())
            })
            .await
            .unwrap_err();
        assert_eq!(status.code(), tonic::Code::Internal);
    }

    #[test]
    fn test_external_runtime_drives_the_queue() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let cq = CompletionQueue::from(runtime.handle().clone());
        let pending = cq.spawn(async { Ok::<_, Status>("on the caller's runtime") });
        assert_eq!(runtime.block_on(pending).unwrap(), "on the caller's runtime");
    }

    #[test]
    fn test_from_current_outside_runtime_fails() {
        assert!(matches!(
            CompletionQueue::from_current(),
            Err(GrpcError::InvalidConfig(_))
        ));
    }
}
