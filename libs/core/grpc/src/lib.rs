//! # gRPC Client Library
//!
//! Service-agnostic plumbing for cloud RPC clients: how many channels to
//! open, which credentials and endpoints they use, how calls carry deadlines
//! and cancellation, where asynchronous calls complete, and how a pool of raw
//! stubs is assembled behind round robin and logging decorators.
//!
//! ## Features
//!
//! - **Pool sizing**: channels per CPU with a fixed fallback when the CPU
//!   count is unknown
//! - **Client options**: production endpoints per service, emulator override,
//!   credentials shared by every channel
//! - **Lazy channels**: HTTP/2 tuning, TLS and user agent, validated at
//!   assembly time without touching the network
//! - **Interceptors**: per-call bearer tokens and the client identifier header
//! - **Tracing options**: which components log and how payloads are rendered
//!
//! ## Quick Start
//!
//! ```ignore
//! use grpc_client::{ClientOptions, ServiceProfile, build_connection, open_channel};
//!
//! let options = ClientOptions::for_service(ServiceProfile::PUBSUB);
//! let stub: Arc<dyn PublisherStub> = build_connection(&options, |options, _index| {
//!     let channel = open_channel(
//!         options.data_endpoint(),
//!         options.credentials(),
//!         options.channel_config(),
//!         options.user_agent(),
//!     )?;
//!     Ok(Arc::new(GrpcPublisherStub::new(channel, options)) as Arc<dyn PublisherStub>)
//! })?;
//! ```

pub mod channel;
pub mod completion_queue;
pub mod connection;
pub mod context;
pub mod credentials;
pub mod error;
pub mod interceptors;
pub mod options;
pub mod pool_size;
pub mod tracing_options;

// Re-export main types and functions for convenience
pub use channel::{ChannelConfig, KeepAlive, open_channel};
pub use completion_queue::{CompletionQueue, PendingCall};
pub use connection::{StubDecorators, build_connection};
pub use context::CallContext;
pub use credentials::Credentials;
pub use error::{GrpcError, GrpcResult};
pub use options::{ClientOptions, ServiceProfile};
pub use pool_size::{PoolSizing, compute_default_pool_size};
pub use tracing_options::{RPC_COMPONENT, TracingOptions};

// Re-export interceptors for convenience
pub use interceptors::{
    ClientHeaderInterceptor, ClientInterceptor, ComposedInterceptor, CredentialsInterceptor,
    client_interceptor, compose_interceptors,
};
