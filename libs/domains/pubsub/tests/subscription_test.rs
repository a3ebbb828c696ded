//! Subscriber-side tests over in-memory stubs: paginated listing through the
//! admin connection and pull / acknowledge through a pooled chain.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use domain_pubsub::*;
use futures::TryStreamExt;
use grpc_client::{
    CallContext, ClientOptions, CompletionQueue, PendingCall, RPC_COMPONENT, ServiceProfile,
};
use protos::google::pubsub::v1::*;
use test_utils::{CaptureLogLines, TestDataBuilder};
use tonic::{Code, Status};

/// Lists one subscription per page and hands out ack ids tagged with `id`.
struct FakeSubscriber {
    id: usize,
    subscriptions: Vec<String>,
    acked: Arc<Mutex<Vec<String>>>,
}

impl FakeSubscriber {
    fn new(id: usize, acked: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            id,
            subscriptions: Vec::new(),
            acked,
        }
    }
}

fn subscription(name: &str) -> Subscription {
    Subscription {
        name: name.to_string(),
        ..Default::default()
    }
}

#[async_trait]
impl SubscriberStub for FakeSubscriber {
    async fn create_subscription(
        &self,
        _: &CallContext,
        request: &Subscription,
    ) -> Result<Subscription, Status> {
        Ok(request.clone())
    }

    async fn get_subscription(
        &self,
        _: &CallContext,
        request: &GetSubscriptionRequest,
    ) -> Result<Subscription, Status> {
        Err(Status::not_found(request.subscription.clone()))
    }

    async fn update_subscription(
        &self,
        _: &CallContext,
        _: &UpdateSubscriptionRequest,
    ) -> Result<Subscription, Status> {
        Err(Status::unimplemented("update"))
    }

    async fn list_subscriptions(
        &self,
        _: &CallContext,
        request: &ListSubscriptionsRequest,
    ) -> Result<ListSubscriptionsResponse, Status> {
        // The page token is the index of the next subscription.
        let index: usize = if request.page_token.is_empty() {
            0
        } else {
            request
                .page_token
                .parse()
                .map_err(|_| Status::invalid_argument("bad page token"))?
        };
        let next_page_token = if index + 1 < self.subscriptions.len() {
            (index + 1).to_string()
        } else {
            String::new()
        };
        Ok(ListSubscriptionsResponse {
            subscriptions: self
                .subscriptions
                .get(index)
                .map(|name| vec![subscription(name)])
                .unwrap_or_default(),
            next_page_token,
        })
    }

    async fn delete_subscription(
        &self,
        _: &CallContext,
        _: &DeleteSubscriptionRequest,
    ) -> Result<(), Status> {
        Ok(())
    }

    fn async_pull(
        &self,
        cq: &CompletionQueue,
        _: CallContext,
        request: &PullRequest,
    ) -> PendingCall<PullResponse> {
        let id = self.id;
        let count = usize::try_from(request.max_messages).unwrap_or(0);
        cq.spawn(async move {
            Ok(PullResponse {
                received_messages: (0..count)
                    .map(|n| ReceivedMessage {
                        ack_id: format!("stub{id}-ack{n}"),
                        message: Some(PubsubMessage::default()),
                        ..Default::default()
                    })
                    .collect(),
            })
        })
    }

    fn async_acknowledge(
        &self,
        _: &CompletionQueue,
        _: CallContext,
        request: &AcknowledgeRequest,
    ) -> PendingCall<()> {
        self.acked.lock().unwrap().extend(request.ack_ids.iter().cloned());
        PendingCall::ready(Ok(()))
    }

    fn async_modify_ack_deadline(
        &self,
        _: &CompletionQueue,
        _: CallContext,
        request: &ModifyAckDeadlineRequest,
    ) -> PendingCall<()> {
        if request.ack_deadline_seconds < 0 {
            return PendingCall::ready(Err(Status::invalid_argument("negative deadline")));
        }
        PendingCall::ready(Ok(()))
    }
}

fn options() -> ClientOptions {
    ClientOptions::resolve(ServiceProfile::PUBSUB, None, Some("localhost:8085"))
}

#[tokio::test]
async fn test_list_subscriptions_across_pages_with_logging() {
    let logs = CaptureLogLines::new();
    let _guard = logs.install();

    let builder = TestDataBuilder::from_test_name("test_list_subscriptions_across_pages");
    let mut fake = FakeSubscriber::new(0, Arc::default());
    fake.subscriptions = vec![
        builder.subscription_name("s-2"),
        builder.subscription_name("s-1"),
        builder.subscription_name("s-3"),
    ];
    let expected = fake.subscriptions.clone();

    let admin = make_subscription_admin_connection(
        &options().enable_tracing(RPC_COMPONENT),
        Arc::new(fake),
    );
    let names: Vec<String> = admin
        .list_subscriptions(builder.project_name())
        .map_ok(|subscription| subscription.name)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(names, expected);
    let requests = logs.lines_containing(">> request");
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|line| line.contains("ListSubscriptions")));
}

#[tokio::test]
async fn test_pull_then_acknowledge_through_pool() {
    let builder = TestDataBuilder::from_test_name("test_pull_then_acknowledge_through_pool");
    let acked: Arc<Mutex<Vec<String>>> = Arc::default();
    let stubs: Vec<Arc<dyn SubscriberStub>> = (0..2)
        .map(|id| Arc::new(FakeSubscriber::new(id, acked.clone())) as Arc<dyn SubscriberStub>)
        .collect();
    let stub = create_subscriber_stub(&options(), stubs).unwrap();
    let cq = CompletionQueue::from_current().unwrap();

    let pull = PullRequest {
        subscription: builder.subscription_name("orders"),
        max_messages: 2,
    };
    // Pull lands on stub 0, acknowledge on stub 1; both share the ack log.
    let pulled = stub.async_pull(&cq, CallContext::new(), &pull).await.unwrap();
    let ack_ids: Vec<String> = pulled
        .received_messages
        .iter()
        .map(|received| received.ack_id.clone())
        .collect();
    assert_eq!(ack_ids, vec!["stub0-ack0", "stub0-ack1"]);

    let ack = AcknowledgeRequest {
        subscription: pull.subscription.clone(),
        ack_ids: ack_ids.clone(),
    };
    stub.async_acknowledge(&cq, CallContext::new(), &ack)
        .await
        .unwrap();
    assert_eq!(*acked.lock().unwrap(), ack_ids);

    // Third call wraps around to stub 0.
    let next = stub.async_pull(&cq, CallContext::new(), &pull).await.unwrap();
    assert_eq!(next.received_messages[0].ack_id, "stub0-ack0");
}

#[tokio::test]
async fn test_modify_ack_deadline_failure_is_passed_through() {
    let stub = create_subscriber_stub(
        &options().enable_tracing(RPC_COMPONENT),
        vec![Arc::new(FakeSubscriber::new(0, Arc::default())) as Arc<dyn SubscriberStub>],
    )
    .unwrap();
    let cq = CompletionQueue::from_current().unwrap();

    let request = ModifyAckDeadlineRequest {
        subscription: "projects/p/subscriptions/s".to_string(),
        ack_deadline_seconds: -1,
        ack_ids: vec!["a".to_string()],
    };
    let status = stub
        .async_modify_ack_deadline(&cq, CallContext::new(), &request)
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "negative deadline");
}
