use tonic::{Request, Status};

/// Run `first`, then `second`, on every outgoing call
///
/// A rejection from `first` is returned as is and `second` never sees the
/// request. Nest the result to chain more than two.
///
/// # Example
/// ```ignore
/// use grpc_client::interceptors::{ClientHeaderInterceptor, CredentialsInterceptor, compose_interceptors};
///
/// let auth = CredentialsInterceptor::new(options.credentials().clone());
/// let header = ClientHeaderInterceptor::new(options.user_agent());
/// let composed = compose_interceptors(auth, header);
///
/// let client = PublisherClient::with_interceptor(channel, composed);
/// ```
pub fn compose_interceptors<A, B>(first: A, second: B) -> ComposedInterceptor<A, B>
where
  A: tonic::service::Interceptor,
  B: tonic::service::Interceptor,
{
  ComposedInterceptor { first, second }
}

/// Pair of interceptors returned by [`compose_interceptors`]
#[derive(Clone, Debug)]
pub struct ComposedInterceptor<A, B> {
  first: A,
  second: B,
}

impl<A, B> tonic::service::Interceptor for ComposedInterceptor<A, B>
where
  A: tonic::service::Interceptor,
  B: tonic::service::Interceptor,
{
  fn call(&mut self, request: Request<()>) -> Result<Request<()>, Status> {
    let request = self.first.call(request)?;
    self.second.call(request)
  }
}
