use async_trait::async_trait;
use grpc_client::{CallContext, CompletionQueue, PendingCall};
use protos::google::pubsub::v1::{
    AcknowledgeRequest, DeleteSubscriptionRequest, DeleteTopicRequest, GetSubscriptionRequest,
    GetTopicRequest, ListSubscriptionsRequest, ListSubscriptionsResponse, ListTopicsRequest,
    ListTopicsResponse, ModifyAckDeadlineRequest, PublishRequest, PublishResponse, PullRequest,
    PullResponse, Subscription, Topic, UpdateSubscriptionRequest, UpdateTopicRequest,
};
use tonic::Status;

/// Capability set of the publisher service
///
/// One method per remote operation. Blocking methods complete when awaited;
/// `async_*` methods return at once and complete on the caller's
/// `CompletionQueue`. The raw gRPC stub, the round-robin pool and the logging
/// decorator all implement it, so any of them can stand in for another.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublisherStub: Send + Sync {
    /// Create a topic with the given name
    async fn create_topic(&self, context: &CallContext, request: &Topic) -> Result<Topic, Status>;

    async fn get_topic(
        &self,
        context: &CallContext,
        request: &GetTopicRequest,
    ) -> Result<Topic, Status>;

    async fn update_topic(
        &self,
        context: &CallContext,
        request: &UpdateTopicRequest,
    ) -> Result<Topic, Status>;

    /// One page of the project's topics
    async fn list_topics(
        &self,
        context: &CallContext,
        request: &ListTopicsRequest,
    ) -> Result<ListTopicsResponse, Status>;

    async fn delete_topic(
        &self,
        context: &CallContext,
        request: &DeleteTopicRequest,
    ) -> Result<(), Status>;

    async fn publish(
        &self,
        context: &CallContext,
        request: &PublishRequest,
    ) -> Result<PublishResponse, Status>;

    /// Publish without waiting, completing on `cq`
    fn async_publish(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &PublishRequest,
    ) -> PendingCall<PublishResponse>;
}

/// Capability set of the subscriber service
///
/// Pull, acknowledge and deadline extension are latency bound and only
/// offered asynchronously.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberStub: Send + Sync {
    async fn create_subscription(
        &self,
        context: &CallContext,
        request: &Subscription,
    ) -> Result<Subscription, Status>;

    async fn get_subscription(
        &self,
        context: &CallContext,
        request: &GetSubscriptionRequest,
    ) -> Result<Subscription, Status>;

    async fn update_subscription(
        &self,
        context: &CallContext,
        request: &UpdateSubscriptionRequest,
    ) -> Result<Subscription, Status>;

    async fn list_subscriptions(
        &self,
        context: &CallContext,
        request: &ListSubscriptionsRequest,
    ) -> Result<ListSubscriptionsResponse, Status>;

    async fn delete_subscription(
        &self,
        context: &CallContext,
        request: &DeleteSubscriptionRequest,
    ) -> Result<(), Status>;

    /// Long poll for messages
    fn async_pull(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &PullRequest,
    ) -> PendingCall<PullResponse>;

    fn async_acknowledge(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &AcknowledgeRequest,
    ) -> PendingCall<()>;

    /// Extend (or, with zero seconds, give up) the ack deadline of messages
    fn async_modify_ack_deadline(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &ModifyAckDeadlineRequest,
    ) -> PendingCall<()>;
}
