//! Pools that spread calls over their stubs in turn.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use grpc_client::{CallContext, CompletionQueue, GrpcError, GrpcResult, PendingCall};
use protos::google::pubsub::v1::{
    AcknowledgeRequest, DeleteSubscriptionRequest, DeleteTopicRequest, GetSubscriptionRequest,
    GetTopicRequest, ListSubscriptionsRequest, ListSubscriptionsResponse, ListTopicsRequest,
    ListTopicsResponse, ModifyAckDeadlineRequest, PublishRequest, PublishResponse, PullRequest,
    PullResponse, Subscription, Topic, UpdateSubscriptionRequest, UpdateTopicRequest,
};
use tonic::Status;

use crate::stub::{PublisherStub, SubscriberStub};

/// Round-robin pool over `children`.
///
/// The cursor is the only mutable state of a stub chain. Under concurrent
/// use the assignment of calls to children is only approximately fair;
/// sequential callers get strict rotation in pool order.
pub struct RoundRobin<S: ?Sized> {
    children: Vec<Arc<S>>,
    current: AtomicUsize,
}

pub type PublisherRoundRobin = RoundRobin<dyn PublisherStub>;
pub type SubscriberRoundRobin = RoundRobin<dyn SubscriberStub>;

impl<S: ?Sized> RoundRobin<S> {
    /// Fails on an empty pool.
    pub fn new(children: Vec<Arc<S>>) -> GrpcResult<Self> {
        if children.is_empty() {
            return Err(GrpcError::InvalidConfig(
                "round robin pool needs at least one stub".to_string(),
            ));
        }
        Ok(Self {
            children,
            current: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn child(&self) -> &S {
        let index = self.current.fetch_add(1, Ordering::Relaxed) % self.children.len();
        &self.children[index]
    }
}

#[async_trait]
impl PublisherStub for RoundRobin<dyn PublisherStub> {
    async fn create_topic(&self, context: &CallContext, request: &Topic) -> Result<Topic, Status> {
        self.child().create_topic(context, request).await
    }

    async fn get_topic(
        &self,
        context: &CallContext,
        request: &GetTopicRequest,
    ) -> Result<Topic, Status> {
        self.child().get_topic(context, request).await
    }

    async fn update_topic(
        &self,
        context: &CallContext,
        request: &UpdateTopicRequest,
    ) -> Result<Topic, Status> {
        self.child().update_topic(context, request).await
    }

    async fn list_topics(
        &self,
        context: &CallContext,
        request: &ListTopicsRequest,
    ) -> Result<ListTopicsResponse, Status> {
        self.child().list_topics(context, request).await
    }

    async fn delete_topic(
        &self,
        context: &CallContext,
        request: &DeleteTopicRequest,
    ) -> Result<(), Status> {
        self.child().delete_topic(context, request).await
    }

    async fn publish(
        &self,
        context: &CallContext,
        request: &PublishRequest,
    ) -> Result<PublishResponse, Status> {
        self.child().publish(context, request).await
    }

    fn async_publish(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &PublishRequest,
    ) -> PendingCall<PublishResponse> {
        self.child().async_publish(cq, context, request)
    }
}

#[async_trait]
impl SubscriberStub for RoundRobin<dyn SubscriberStub> {
    async fn create_subscription(
        &self,
        context: &CallContext,
        request: &Subscription,
    ) -> Result<Subscription, Status> {
        self.child().create_subscription(context, request).await
    }

    async fn get_subscription(
        &self,
        context: &CallContext,
        request: &GetSubscriptionRequest,
    ) -> Result<Subscription, Status> {
        self.child().get_subscription(context, request).await
    }

    async fn update_subscription(
        &self,
        context: &CallContext,
        request: &UpdateSubscriptionRequest,
    ) -> Result<Subscription, Status> {
        self.child().update_subscription(context, request).await
    }

    async fn list_subscriptions(
        &self,
        context: &CallContext,
        request: &ListSubscriptionsRequest,
    ) -> Result<ListSubscriptionsResponse, Status> {
        self.child().list_subscriptions(context, request).await
    }

    async fn delete_subscription(
        &self,
        context: &CallContext,
        request: &DeleteSubscriptionRequest,
    ) -> Result<(), Status> {
        self.child().delete_subscription(context, request).await
    }

    fn async_pull(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &PullRequest,
    ) -> PendingCall<PullResponse> {
        self.child().async_pull(cq, context, request)
    }

    fn async_acknowledge(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &AcknowledgeRequest,
    ) -> PendingCall<()> {
        self.child().async_acknowledge(cq, context, request)
    }

    fn async_modify_ack_deadline(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &ModifyAckDeadlineRequest,
    ) -> PendingCall<()> {
        self.child().async_modify_ack_deadline(cq, context, request)
    }
}
