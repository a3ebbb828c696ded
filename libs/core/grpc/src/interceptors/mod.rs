/// Re-export tonic's Interceptor trait for convenience
pub use tonic::service::Interceptor;

pub mod compose;
pub mod credentials;

pub use compose::{compose_interceptors, ComposedInterceptor};
pub use credentials::{ClientHeaderInterceptor, CredentialsInterceptor};

use crate::options::ClientOptions;

/// Interceptor chain installed on every channel of a client.
pub type ClientInterceptor = ComposedInterceptor<CredentialsInterceptor, ClientHeaderInterceptor>;

/// Build the interceptor chain for a client: credentials, then client header.
pub fn client_interceptor(options: &ClientOptions) -> ClientInterceptor {
    compose_interceptors(
        CredentialsInterceptor::new(options.credentials().clone()),
        ClientHeaderInterceptor::new(options.user_agent()),
    )
}
