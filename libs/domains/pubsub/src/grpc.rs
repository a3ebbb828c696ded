//! Raw stubs: one tonic call per remote operation.

use std::future::Future;

use async_trait::async_trait;
use grpc_client::{
    CallContext, ClientInterceptor, ClientOptions, CompletionQueue, GrpcResult, PendingCall,
    client_interceptor, open_channel,
};
use protos::google::pubsub::v1::publisher_client::PublisherClient;
use protos::google::pubsub::v1::subscriber_client::SubscriberClient;
use protos::google::pubsub::v1::{
    AcknowledgeRequest, DeleteSubscriptionRequest, DeleteTopicRequest, GetSubscriptionRequest,
    GetTopicRequest, ListSubscriptionsRequest, ListSubscriptionsResponse, ListTopicsRequest,
    ListTopicsResponse, ModifyAckDeadlineRequest, PublishRequest, PublishResponse, PullRequest,
    PullResponse, Subscription, Topic, UpdateSubscriptionRequest, UpdateTopicRequest,
};
use tonic::codec::CompressionEncoding;
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use tonic::{Request, Response, Status};

use crate::stub::{PublisherStub, SubscriberStub};

type Transport = InterceptedService<Channel, ClientInterceptor>;

/// Issue one unary call under the caller's deadline and cancellation.
async fn unary<Req, Resp, F, Fut>(context: &CallContext, request: &Req, call: F) -> Result<Resp, Status>
where
    Req: Clone,
    F: FnOnce(Request<Req>) -> Fut,
    Fut: Future<Output = Result<Response<Resp>, Status>>,
{
    context
        .run(call(context.request(request.clone())))
        .await
        .map(Response::into_inner)
}

/// Publisher stub bound to a single channel.
#[derive(Clone)]
pub struct GrpcPublisherStub {
    client: PublisherClient<Transport>,
}

impl GrpcPublisherStub {
    pub fn new(channel: Channel, options: &ClientOptions) -> Self {
        let config = options.channel_config();
        let client = PublisherClient::with_interceptor(channel, client_interceptor(options))
            .accept_compressed(CompressionEncoding::Zstd)
            .max_decoding_message_size(config.max_decoding_message_size)
            .max_encoding_message_size(config.max_encoding_message_size);
        Self { client }
    }

    /// Open a lazy channel to the data endpoint and bind a stub to it.
    pub fn connect(options: &ClientOptions) -> GrpcResult<Self> {
        let channel = open_channel(
            options.data_endpoint(),
            options.credentials(),
            options.channel_config(),
            options.user_agent(),
        )?;
        Ok(Self::new(channel, options))
    }
}

#[async_trait]
impl PublisherStub for GrpcPublisherStub {
    async fn create_topic(&self, context: &CallContext, request: &Topic) -> Result<Topic, Status> {
        let mut client = self.client.clone();
        unary(context, request, move |req| async move { client.create_topic(req).await }).await
    }

    async fn get_topic(
        &self,
        context: &CallContext,
        request: &GetTopicRequest,
    ) -> Result<Topic, Status> {
        let mut client = self.client.clone();
        unary(context, request, move |req| async move { client.get_topic(req).await }).await
    }

    async fn update_topic(
        &self,
        context: &CallContext,
        request: &UpdateTopicRequest,
    ) -> Result<Topic, Status> {
        let mut client = self.client.clone();
        unary(context, request, move |req| async move { client.update_topic(req).await }).await
    }

    async fn list_topics(
        &self,
        context: &CallContext,
        request: &ListTopicsRequest,
    ) -> Result<ListTopicsResponse, Status> {
        let mut client = self.client.clone();
        unary(context, request, move |req| async move { client.list_topics(req).await }).await
    }

    async fn delete_topic(
        &self,
        context: &CallContext,
        request: &DeleteTopicRequest,
    ) -> Result<(), Status> {
        let mut client = self.client.clone();
        unary(context, request, move |req| async move { client.delete_topic(req).await })
            .await
            .map(drop)
    }

    async fn publish(
        &self,
        context: &CallContext,
        request: &PublishRequest,
    ) -> Result<PublishResponse, Status> {
        let mut client = self.client.clone();
        unary(context, request, move |req| async move { client.publish(req).await }).await
    }

    fn async_publish(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &PublishRequest,
    ) -> PendingCall<PublishResponse> {
        let mut client = self.client.clone();
        let request = request.clone();
        cq.spawn(async move {
            unary(&context, &request, move |req| async move { client.publish(req).await }).await
        })
    }
}

/// Subscriber stub bound to a single channel.
#[derive(Clone)]
pub struct GrpcSubscriberStub {
    client: SubscriberClient<Transport>,
}

impl GrpcSubscriberStub {
    pub fn new(channel: Channel, options: &ClientOptions) -> Self {
        let config = options.channel_config();
        let client = SubscriberClient::with_interceptor(channel, client_interceptor(options))
            .accept_compressed(CompressionEncoding::Zstd)
            .max_decoding_message_size(config.max_decoding_message_size)
            .max_encoding_message_size(config.max_encoding_message_size);
        Self { client }
    }

    /// Open a lazy channel to the data endpoint and bind a stub to it.
    pub fn connect(options: &ClientOptions) -> GrpcResult<Self> {
        let channel = open_channel(
            options.data_endpoint(),
            options.credentials(),
            options.channel_config(),
            options.user_agent(),
        )?;
        Ok(Self::new(channel, options))
    }
}

#[async_trait]
impl SubscriberStub for GrpcSubscriberStub {
    async fn create_subscription(
        &self,
        context: &CallContext,
        request: &Subscription,
    ) -> Result<Subscription, Status> {
        let mut client = self.client.clone();
        unary(context, request, move |req| async move { client.create_subscription(req).await })
            .await
    }

    async fn get_subscription(
        &self,
        context: &CallContext,
        request: &GetSubscriptionRequest,
    ) -> Result<Subscription, Status> {
        let mut client = self.client.clone();
        unary(context, request, move |req| async move { client.get_subscription(req).await }).await
    }

    async fn update_subscription(
        &self,
        context: &CallContext,
        request: &UpdateSubscriptionRequest,
    ) -> Result<Subscription, Status> {
        let mut client = self.client.clone();
        unary(context, request, move |req| async move { client.update_subscription(req).await })
            .await
    }

    async fn list_subscriptions(
        &self,
        context: &CallContext,
        request: &ListSubscriptionsRequest,
    ) -> Result<ListSubscriptionsResponse, Status> {
        let mut client = self.client.clone();
        unary(context, request, move |req| async move { client.list_subscriptions(req).await })
            .await
    }

    async fn delete_subscription(
        &self,
        context: &CallContext,
        request: &DeleteSubscriptionRequest,
    ) -> Result<(), Status> {
        let mut client = self.client.clone();
        unary(context, request, move |req| async move { client.delete_subscription(req).await })
            .await
            .map(drop)
    }

    fn async_pull(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &PullRequest,
    ) -> PendingCall<PullResponse> {
        let mut client = self.client.clone();
        let request = request.clone();
        cq.spawn(async move {
            unary(&context, &request, move |req| async move { client.pull(req).await }).await
        })
    }

    fn async_acknowledge(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &AcknowledgeRequest,
    ) -> PendingCall<()> {
        let mut client = self.client.clone();
        let request = request.clone();
        cq.spawn(async move {
            unary(&context, &request, move |req| async move { client.acknowledge(req).await })
                .await
                .map(drop)
        })
    }

    fn async_modify_ack_deadline(
        &self,
        cq: &CompletionQueue,
        context: CallContext,
        request: &ModifyAckDeadlineRequest,
    ) -> PendingCall<()> {
        let mut client = self.client.clone();
        let request = request.clone();
        cq.spawn(async move {
            unary(&context, &request, move |req| async move {
                client.modify_ack_deadline(req).await
            })
            .await
            .map(drop)
        })
    }
}
