//! Factories assembling the publisher and subscriber stub chains.

use std::sync::Arc;

use grpc_client::{
    ClientOptions, GrpcError, GrpcResult, StubDecorators, TracingOptions, build_connection,
};

use crate::grpc::{GrpcPublisherStub, GrpcSubscriberStub};
use crate::logging::{PublisherLogging, SubscriberLogging};
use crate::round_robin::RoundRobin;
use crate::stub::{PublisherStub, SubscriberStub};

impl StubDecorators for dyn PublisherStub {
    fn round_robin(children: Vec<Arc<Self>>) -> GrpcResult<Arc<Self>> {
        Ok(Arc::new(RoundRobin::new(children)?))
    }

    fn with_logging(child: Arc<Self>, options: TracingOptions) -> Arc<Self> {
        Arc::new(PublisherLogging::new(child, options))
    }
}

impl StubDecorators for dyn SubscriberStub {
    fn round_robin(children: Vec<Arc<Self>>) -> GrpcResult<Arc<Self>> {
        Ok(Arc::new(RoundRobin::new(children)?))
    }

    fn with_logging(child: Arc<Self>, options: TracingOptions) -> Arc<Self> {
        Arc::new(SubscriberLogging::new(child, options))
    }
}

/// Publisher stub chain over `options.connection_pool_size()` lazy channels.
///
/// Must be called inside a Tokio runtime. Invalid endpoints, user agents or
/// TLS settings fail here, before any call is made.
///
/// # Example
/// ```ignore
/// let options = ClientOptions::for_service(ServiceProfile::PUBSUB);
/// let publisher = make_publisher_stub(&options)?;
/// let response = publisher.publish(&CallContext::new(), &request).await?;
/// ```
pub fn make_publisher_stub(options: &ClientOptions) -> GrpcResult<Arc<dyn PublisherStub>> {
    build_connection(options, |options, _| {
        Ok(Arc::new(GrpcPublisherStub::connect(options)?) as Arc<dyn PublisherStub>)
    })
}

/// Subscriber stub chain over `options.connection_pool_size()` lazy channels.
pub fn make_subscriber_stub(options: &ClientOptions) -> GrpcResult<Arc<dyn SubscriberStub>> {
    build_connection(options, |options, _| {
        Ok(Arc::new(GrpcSubscriberStub::connect(options)?) as Arc<dyn SubscriberStub>)
    })
}

/// Publisher stub chain over caller-provided stubs, one per pool slot.
pub fn create_publisher_stub(
    options: &ClientOptions,
    stubs: Vec<Arc<dyn PublisherStub>>,
) -> GrpcResult<Arc<dyn PublisherStub>> {
    assemble(options, stubs)
}

/// Subscriber stub chain over caller-provided stubs, one per pool slot.
pub fn create_subscriber_stub(
    options: &ClientOptions,
    stubs: Vec<Arc<dyn SubscriberStub>>,
) -> GrpcResult<Arc<dyn SubscriberStub>> {
    assemble(options, stubs)
}

fn assemble<S>(options: &ClientOptions, stubs: Vec<Arc<S>>) -> GrpcResult<Arc<S>>
where
    S: StubDecorators + ?Sized,
{
    let options = options.clone().with_connection_pool_size(stubs.len());
    let mut stubs = stubs.into_iter();
    build_connection(&options, |_, index| {
        stubs
            .next()
            .ok_or_else(|| GrpcError::InvalidConfig(format!("no stub for pool slot {index}")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::MockPublisherStub;
    use grpc_client::{CallContext, RPC_COMPONENT, ServiceProfile};
    use protos::google::pubsub::v1::{DeleteTopicRequest, PublishRequest, PublishResponse};
    use test_utils::CaptureLogLines;

    fn options(tracing: bool) -> ClientOptions {
        let tracing_options = if tracing {
            TracingOptions::default().enable(RPC_COMPONENT)
        } else {
            TracingOptions::default()
        };
        ClientOptions::resolve(ServiceProfile::PUBSUB, None, Some("localhost:8085"))
            .with_tracing_options(tracing_options)
    }

    #[test]
    fn test_create_without_stubs_fails() {
        let result = create_publisher_stub(&options(false), Vec::new());
        assert!(matches!(result, Err(GrpcError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_make_opens_one_channel_per_slot() {
        let options = options(false).with_connection_pool_size(3);
        assert!(make_publisher_stub(&options).is_ok());
        assert!(make_subscriber_stub(&options).is_ok());
    }

    #[tokio::test]
    async fn test_make_fails_fast_on_invalid_endpoint() {
        let options = options(false).with_data_endpoint("bad endpoint");
        assert!(matches!(
            make_publisher_stub(&options),
            Err(GrpcError::InvalidUri { .. })
        ));
    }

    #[tokio::test]
    async fn test_logging_inserted_only_when_tracing_enabled() {
        let logs = CaptureLogLines::new();
        let _guard = logs.install();

        for tracing in [false, true] {
            let mut mock = MockPublisherStub::new();
            mock.expect_delete_topic().returning(|_, _| Ok(()));
            let child: Arc<dyn PublisherStub> = Arc::new(mock);
            let stub = create_publisher_stub(&options(tracing), vec![child]).unwrap();
            stub.delete_topic(&CallContext::new(), &DeleteTopicRequest::default())
                .await
                .unwrap();
        }

        assert_eq!(logs.lines_containing(">> request").len(), 1);
        assert_eq!(logs.lines_containing("<< response").len(), 1);
    }

    #[tokio::test]
    async fn test_create_uses_every_stub() {
        let stubs: Vec<Arc<dyn PublisherStub>> = (0..2)
            .map(|_| {
                let mut mock = MockPublisherStub::new();
                mock.expect_publish()
                    .times(1)
                    .returning(|_, _| Ok(PublishResponse::default()));
                Arc::new(mock) as Arc<dyn PublisherStub>
            })
            .collect();
        let stub = create_publisher_stub(&options(false), stubs).unwrap();

        for _ in 0..2 {
            stub.publish(&CallContext::new(), &PublishRequest::default())
                .await
                .unwrap();
        }
    }
}
