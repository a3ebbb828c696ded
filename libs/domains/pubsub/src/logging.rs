//! Decorators that log every call made through a stub.
//!
//! Each call gets a fresh `request_id`; its ">> request" record is emitted
//! before the child is invoked and its "<< response" record once the result
//! is known. Records of concurrent calls may interleave, the `request_id`
//! ties the pair together.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use grpc_client::{CallContext, CompletionQueue, PendingCall, TracingOptions};
use protos::google::pubsub::v1::{
    AcknowledgeRequest, DeleteSubscriptionRequest, DeleteTopicRequest, GetSubscriptionRequest,
    GetTopicRequest, ListSubscriptionsRequest, ListSubscriptionsResponse, ListTopicsRequest,
    ListTopicsResponse, ModifyAckDeadlineRequest, PublishRequest, PublishResponse, PullRequest,
    PullResponse, Subscription, Topic, UpdateSubscriptionRequest, UpdateTopicRequest,
};
use serde::Serialize;
use tokio::time::Instant;
use tonic::{Code, Status};
use uuid::Uuid;

use crate::stub::{PublisherStub, SubscriberStub};

const TARGET: &str = "grpc_client::rpc";

/// One logged call, from its request record to its response record.
///
/// Dropping the scope before [`RpcLogScope::finish`] means the caller gave
/// up on the call; the response record is then emitted as `Cancelled`.
struct RpcLogScope {
    request_id: Uuid,
    method: &'static str,
    started: Instant,
    finished: bool,
}

impl RpcLogScope {
    fn enter<Req>(method: &'static str, options: &TracingOptions, request: &Req) -> Self
    where
        Req: Serialize + ?Sized,
    {
        let request_id = Uuid::new_v4();
        tracing::debug!(
            target: TARGET,
            %request_id,
            method,
            request = %options.format_payload(request),
            ">> request"
        );
        Self {
            request_id,
            method,
            started: Instant::now(),
            finished: false,
        }
    }

    fn finish<Resp>(mut self, options: &TracingOptions, result: &Result<Resp, Status>)
    where
        Resp: Serialize,
    {
        self.finished = true;
        let elapsed_ms = self.elapsed_ms();
        match result {
            Ok(response) => tracing::debug!(
                target: TARGET,
                request_id = %self.request_id,
                method = self.method,
                elapsed_ms,
                code = ?Code::Ok,
                response = %options.format_payload(response),
                "<< response"
            ),
            Err(status) => tracing::debug!(
                target: TARGET,
                request_id = %self.request_id,
                method = self.method,
                elapsed_ms,
                code = ?status.code(),
                status = %status.message(),
                "<< response"
            ),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Drop for RpcLogScope {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(
                target: TARGET,
                request_id = %self.request_id,
                method = self.method,
                elapsed_ms = self.elapsed_ms(),
                code = ?Code::Cancelled,
                status = "call dropped before it completed",
                "<< response"
            );
        }
    }
}

/// Log a blocking call around `call`.
async fn logged<Req, Resp, Fut>(
    options: &TracingOptions,
    method: &'static str,
    request: &Req,
    call: Fut,
) -> Result<Resp, Status>
where
    Req: Serialize + ?Sized,
    Resp: Serialize,
    Fut: Future<Output = Result<Resp, Status>>,
{
    let scope = RpcLogScope::enter(method, options, request);
    let result = call.await;
    scope.finish(options, &result);
    result
}

/// Log an asynchronous call: the request record when `issue` runs, the
/// response record from a task on `cq` once the call completes.
fn logged_async<Req, Resp, F>(
    options: &Arc<TracingOptions>,
    method: &'static str,
    cq: &CompletionQueue,
    request: &Req,
    issue: F,
) -> PendingCall<Resp>
where
    Req: Serialize + ?Sized,
    Resp: Serialize + Send + 'static,
    F: FnOnce() -> PendingCall<Resp>,
{
    let scope = RpcLogScope::enter(method, options, request);
    let pending = issue();
    let options = options.clone();
    cq.spawn(async move {
        let result = pending.await;
        scope.finish(&options, &result);
        result
    })
}

/// Logging decorator for a [`PublisherStub`].
pub struct PublisherLogging {
    child: Arc<dyn PublisherStub>,
    options: Arc<TracingOptions>,
}

impl PublisherLogging {
    pub fn new(child: Arc<dyn PublisherStub>, options: TracingOptions) -> Self {
        Self {
            child,
            options: Arc::new(options),
        }
    }
}

#[async_trait]
impl PublisherStub for PublisherLogging {
    async fn create_topic(&self, context: &CallContext, request: &Topic) -> Result<Topic, Status> {
        logged(&self.options, "CreateTopic", request, self.child.create_topic(context, request)).await
    }

    async fn get_topic(
        &self,
        context: &CallContext,
        request: &GetTopicRequest,
    ) -> Result<Topic, Status> {
        logged(&self.options, "GetTopic", request, self.child.get_topic(context, request)).await
    }

    async fn update_topic(
        &self,
        context: &CallContext,
        request: &UpdateTopicRequest,
    ) -> Result<Topic, Status> {
        logged(&self.options, "UpdateTopic", request, self.child.update_topic(context, request)).await
    }

    async fn list_topics(
        &self,
        context: &CallContext,
        request: &ListTopicsRequest,
    ) -> Result<ListTopicsResponse, Status> {
        logged(&self.options, "ListTopics", request, self.child.list_topics(context, request)).await
    }

    async fn delete_topic(
        &self,
        context: &CallContext,
        request: &DeleteTopicRequest,
    ) -> Result<(), Status> {
        logged(&self.options, "DeleteTopic", request, self.child.delete_topic(context, request)).await
    }

    async fn publish(
        &self,
        context: &CallContext,
        request: &PublishRequest,
    ) -> Result<PublishResponse, Status> {
        logged(&self.options, "Publish", request, self.child.publish(context, request)).await
    }

    fn async_publish(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &PublishRequest,
    ) -> PendingCall<PublishResponse> {
        logged_async(&self.options, "AsyncPublish", cq, request, || {
            self.child.async_publish(cq, context, request)
        })
    }
}

/// Logging decorator for a [`SubscriberStub`].
pub struct SubscriberLogging {
    child: Arc<dyn SubscriberStub>,
    options: Arc<TracingOptions>,
}

impl SubscriberLogging {
    pub fn new(child: Arc<dyn SubscriberStub>, options: TracingOptions) -> Self {
        Self {
            child,
            options: Arc::new(options),
        }
    }
}

#[async_trait]
impl SubscriberStub for SubscriberLogging {
    async fn create_subscription(
        &self,
        context: &CallContext,
        request: &Subscription,
    ) -> Result<Subscription, Status> {
        logged(
            &self.options,
            "CreateSubscription",
            request,
            self.child.create_subscription(context, request),
        )
        .await
    }

    async fn get_subscription(
        &self,
        context: &CallContext,
        request: &GetSubscriptionRequest,
    ) -> Result<Subscription, Status> {
        logged(
            &self.options,
            "GetSubscription",
            request,
            self.child.get_subscription(context, request),
        )
        .await
    }

    async fn update_subscription(
        &self,
        context: &CallContext,
        request: &UpdateSubscriptionRequest,
    ) -> Result<Subscription, Status> {
        logged(
            &self.options,
            "UpdateSubscription",
            request,
            self.child.update_subscription(context, request),
        )
        .await
    }

    async fn list_subscriptions(
        &self,
        context: &CallContext,
        request: &ListSubscriptionsRequest,
    ) -> Result<ListSubscriptionsResponse, Status> {
        logged(
            &self.options,
            "ListSubscriptions",
            request,
            self.child.list_subscriptions(context, request),
        )
        .await
    }

    async fn delete_subscription(
        &self,
        context: &CallContext,
        request: &DeleteSubscriptionRequest,
    ) -> Result<(), Status> {
        logged(
            &self.options,
            "DeleteSubscription",
            request,
            self.child.delete_subscription(context, request),
        )
        .await
    }

    fn async_pull(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &PullRequest,
    ) -> PendingCall<PullResponse> {
        logged_async(&self.options, "AsyncPull", cq, request, || {
            self.child.async_pull(cq, context, request)
        })
    }

    fn async_acknowledge(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &AcknowledgeRequest,
    ) -> PendingCall<()> {
        logged_async(&self.options, "AsyncAcknowledge", cq, request, || {
            self.child.async_acknowledge(cq, context, request)
        })
    }

    fn async_modify_ack_deadline(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &ModifyAckDeadlineRequest,
    ) -> PendingCall<()> {
        logged_async(&self.options, "AsyncModifyAckDeadline", cq, request, || {
            self.child.async_modify_ack_deadline(cq, context, request)
        })
    }
}
