use std::sync::Arc;
use std::time::Duration;

use async_stream::stream;
use futures::stream::BoxStream;
use grpc_client::{CallContext, ClientOptions, GrpcResult, RPC_COMPONENT};
use protos::google::pubsub::v1::{
    DeleteSubscriptionRequest, GetSubscriptionRequest, ListSubscriptionsRequest, Subscription,
    UpdateSubscriptionRequest,
};
use tonic::Status;

use crate::connection::make_subscriber_stub;
use crate::logging::SubscriberLogging;
use crate::stub::SubscriberStub;
use crate::topic_admin::DEFAULT_ADMIN_TIMEOUT;

/// Subscription management on top of a subscriber stub chain
#[derive(Clone)]
pub struct SubscriptionAdminConnection {
    stub: Arc<dyn SubscriberStub>,
    timeout: Duration,
}

impl SubscriptionAdminConnection {
    pub fn new(stub: Arc<dyn SubscriberStub>) -> Self {
        Self {
            stub,
            timeout: DEFAULT_ADMIN_TIMEOUT,
        }
    }

    pub fn connect(options: &ClientOptions) -> GrpcResult<Self> {
        Ok(Self::new(make_subscriber_stub(options)?))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn context(&self) -> CallContext {
        CallContext::new().with_timeout(self.timeout)
    }

    pub async fn create_subscription(
        &self,
        subscription: Subscription,
    ) -> Result<Subscription, Status> {
        self.stub
            .create_subscription(&self.context(), &subscription)
            .await
    }

    pub async fn get_subscription(
        &self,
        subscription: impl Into<String>,
    ) -> Result<Subscription, Status> {
        let request = GetSubscriptionRequest {
            subscription: subscription.into(),
        };
        self.stub.get_subscription(&self.context(), &request).await
    }

    pub async fn update_subscription(
        &self,
        request: UpdateSubscriptionRequest,
    ) -> Result<Subscription, Status> {
        self.stub.update_subscription(&self.context(), &request).await
    }

    /// Every subscription of `project`, in server order.
    pub fn list_subscriptions(
        &self,
        project: impl Into<String>,
    ) -> BoxStream<'static, Result<Subscription, Status>> {
        let stub = self.stub.clone();
        let timeout = self.timeout;
        let mut request = ListSubscriptionsRequest {
            project: project.into(),
            ..Default::default()
        };

        Box::pin(stream! {
            loop {
                let context = CallContext::new().with_timeout(timeout);
                match stub.list_subscriptions(&context, &request).await {
                    Ok(page) => {
                        for subscription in page.subscriptions {
                            yield Ok::<Subscription, Status>(subscription);
                        }
                        if page.next_page_token.is_empty() {
                            break;
                        }
                        request.page_token = page.next_page_token;
                    }
                    Err(status) => {
                        yield Err(status);
                        break;
                    }
                }
            }
        })
    }

    pub async fn delete_subscription(&self, subscription: impl Into<String>) -> Result<(), Status> {
        let request = DeleteSubscriptionRequest {
            subscription: subscription.into(),
        };
        self.stub.delete_subscription(&self.context(), &request).await
    }
}

/// Admin connection over a caller-supplied stub, logged when the `rpc`
/// tracing component is enabled in `options`.
pub fn make_subscription_admin_connection(
    options: &ClientOptions,
    stub: Arc<dyn SubscriberStub>,
) -> SubscriptionAdminConnection {
    let stub = if options.tracing_options().is_enabled(RPC_COMPONENT) {
        let logged = SubscriberLogging::new(stub, options.tracing_options().clone());
        Arc::new(logged) as Arc<dyn SubscriberStub>
    } else {
        stub
    };
    SubscriptionAdminConnection::new(stub)
}
