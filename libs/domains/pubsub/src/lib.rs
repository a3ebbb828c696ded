//! Pub/Sub Domain
//!
//! Publisher and subscriber stubs for the publish/subscribe message bus,
//! plus the connections built on top of them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  Admin connections   │  ← Topic / subscription management, pagination
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │   Logging decorator  │  ← Only when the `rpc` tracing component is on
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │  Round-robin pool    │  ← One raw stub per channel
//! └──────────┬───────────┘
//!            │
//! ┌──────────▼───────────┐
//! │   gRPC raw stubs     │  ← tonic clients over lazy channels
//! └──────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_pubsub::{PublisherStub, TopicAdminConnection, make_publisher_stub};
//! use grpc_client::{CallContext, ClientOptions, ServiceProfile};
//! use protos::google::pubsub::v1::{PublishRequest, PubsubMessage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ClientOptions::for_service(ServiceProfile::PUBSUB);
//!
//! let admin = TopicAdminConnection::connect(&options)?;
//! admin.delete_topic("projects/my-project/topics/stale").await?;
//!
//! let publisher = make_publisher_stub(&options)?;
//! let request = PublishRequest {
//!     topic: "projects/my-project/topics/orders".to_string(),
//!     messages: vec![PubsubMessage {
//!         data: b"hello".to_vec(),
//!         ..Default::default()
//!     }],
//! };
//! publisher.publish(&CallContext::new(), &request).await?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod grpc;
pub mod logging;
pub mod round_robin;
pub mod stub;
pub mod subscription_admin;
pub mod topic_admin;

// Re-export commonly used types
pub use connection::{
    create_publisher_stub, create_subscriber_stub, make_publisher_stub, make_subscriber_stub,
};
pub use grpc::{GrpcPublisherStub, GrpcSubscriberStub};
pub use logging::{PublisherLogging, SubscriberLogging};
pub use round_robin::{PublisherRoundRobin, RoundRobin, SubscriberRoundRobin};
pub use stub::{PublisherStub, SubscriberStub};
pub use subscription_admin::{SubscriptionAdminConnection, make_subscription_admin_connection};
pub use topic_admin::{DEFAULT_ADMIN_TIMEOUT, TopicAdminConnection, make_topic_admin_connection};
