use std::sync::Arc;
use std::time::Duration;

use async_stream::stream;
use futures::stream::BoxStream;
use grpc_client::{CallContext, ClientOptions, GrpcResult, RPC_COMPONENT};
use protos::google::pubsub::v1::{
    DeleteTopicRequest, GetTopicRequest, ListTopicsRequest, Topic, UpdateTopicRequest,
};
use tonic::Status;

use crate::connection::make_publisher_stub;
use crate::logging::PublisherLogging;
use crate::stub::PublisherStub;

/// Deadline applied to each admin call.
pub const DEFAULT_ADMIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Topic management on top of a publisher stub chain
///
/// Every call runs under a fresh `CallContext` bounded by the connection's
/// timeout. Listing follows page tokens until the server reports the last
/// page.
#[derive(Clone)]
pub struct TopicAdminConnection {
    stub: Arc<dyn PublisherStub>,
    timeout: Duration,
}

impl TopicAdminConnection {
    pub fn new(stub: Arc<dyn PublisherStub>) -> Self {
        Self {
            stub,
            timeout: DEFAULT_ADMIN_TIMEOUT,
        }
    }

    /// Connect through a freshly assembled publisher stub chain.
    pub fn connect(options: &ClientOptions) -> GrpcResult<Self> {
        Ok(Self::new(make_publisher_stub(options)?))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn context(&self) -> CallContext {
        CallContext::new().with_timeout(self.timeout)
    }

    pub async fn create_topic(&self, topic: Topic) -> Result<Topic, Status> {
        self.stub.create_topic(&self.context(), &topic).await
    }

    /// Fetch a topic by its full name, `projects/{project}/topics/{topic}`.
    pub async fn get_topic(&self, topic: impl Into<String>) -> Result<Topic, Status> {
        let request = GetTopicRequest {
            topic: topic.into(),
        };
        self.stub.get_topic(&self.context(), &request).await
    }

    pub async fn update_topic(&self, request: UpdateTopicRequest) -> Result<Topic, Status> {
        self.stub.update_topic(&self.context(), &request).await
    }

    /// Every topic of `project` (`projects/{project}`), in server order.
    pub fn list_topics(
        &self,
        project: impl Into<String>,
    ) -> BoxStream<'static, Result<Topic, Status>> {
        let stub = self.stub.clone();
        let timeout = self.timeout;
        let mut request = ListTopicsRequest {
            project: project.into(),
            ..Default::default()
        };

        Box::pin(stream! {
            loop {
                let context = CallContext::new().with_timeout(timeout);
                match stub.list_topics(&context, &request).await {
                    Ok(page) => {
                        for topic in page.topics {
                            yield Ok::<Topic, Status>(topic);
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

    pub async fn delete_topic(&self, topic: impl Into<String>) -> Result<(), Status> {
        let request = DeleteTopicRequest {
            topic: topic.into(),
        };
        self.stub.delete_topic(&self.context(), &request).await
    }
}

/// Admin connection over a caller-supplied stub, logged when the `rpc`
/// tracing component is enabled in `options`.
pub fn make_topic_admin_connection(
    options: &ClientOptions,
    stub: Arc<dyn PublisherStub>,
) -> TopicAdminConnection {
    let stub = if options.tracing_options().is_enabled(RPC_COMPONENT) {
        let logged = PublisherLogging::new(stub, options.tracing_options().clone());
        Arc::new(logged) as Arc<dyn PublisherStub>
    } else {
        stub
    };
    TopicAdminConnection::new(stub)
}
