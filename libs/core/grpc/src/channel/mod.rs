pub mod config;

pub use config::{ChannelConfig, KeepAlive};

use crate::credentials::Credentials;
use crate::error::{GrpcError, GrpcResult};
use tonic::transport::{Channel, Endpoint};

/// Opens a lazy gRPC channel to `endpoint` that connects on first request
///
/// `endpoint` is a host with optional port (`pubsub.googleapis.com`,
/// `localhost:8085`); the scheme follows the credentials, https for secure
/// ones and http otherwise. An explicit scheme is kept as given.
///
/// Everything that can be checked without the network is checked here: the
/// URI, the user agent and the TLS setup. Connection failures show up as
/// `UNAVAILABLE` on the first call instead.
///
/// Must be called inside a Tokio runtime, the channel spawns its worker there.
///
/// ## Example
/// ```ignore
/// use grpc_client::{open_channel, ChannelConfig, Credentials};
///
/// let channel = open_channel("localhost:8085", &Credentials::Insecure, &ChannelConfig::default(), "pubsub-rust/0.1.0")?;
/// ```
pub fn open_channel(
  endpoint: &str,
  credentials: &Credentials,
  config: &ChannelConfig,
  user_agent: &str,
) -> GrpcResult<Channel> {
  if endpoint.is_empty() {
    return Err(GrpcError::InvalidConfig("endpoint must not be empty".to_string()));
  }
  if tokio::runtime::Handle::try_current().is_err() {
    return Err(GrpcError::InvalidConfig(
      "channels must be opened inside a Tokio runtime".to_string(),
    ));
  }

  let uri = endpoint_uri(endpoint, credentials);

  let channel_endpoint = Endpoint::from_shared(uri.clone()).map_err(|e| {
    tracing::error!(target: "grpc_client", uri = %uri, error = ?e, "Invalid URI");
    GrpcError::InvalidUri {
      uri: uri.clone(),
      source: e,
    }
  })?;

  let channel_endpoint = channel_endpoint.user_agent(user_agent).map_err(|e| {
    GrpcError::InvalidConfig(format!("invalid user agent '{user_agent}': {e}"))
  })?;

  let mut channel_endpoint = config.apply_to_endpoint(channel_endpoint);
  if credentials.is_secure() {
    channel_endpoint = configure_tls(channel_endpoint, &uri)?;
  }

  tracing::debug!(
    target: "grpc_client",
    uri = %uri,
    secure = credentials.is_secure(),
    "Creating lazy gRPC channel (connects on first request)"
  );

  // connect_lazy() returns a Channel without establishing connection
  Ok(channel_endpoint.connect_lazy())
}

fn endpoint_uri(endpoint: &str, credentials: &Credentials) -> String {
  if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
    endpoint.to_string()
  } else {
    format!("{}://{}", credentials.scheme(), endpoint)
  }
}

#[cfg(feature = "tls")]
fn configure_tls(endpoint: Endpoint, uri: &str) -> GrpcResult<Endpoint> {
  use tonic::transport::ClientTlsConfig;

  let domain = endpoint.uri().host().unwrap_or_default().to_string();
  let tls = ClientTlsConfig::new().with_webpki_roots().domain_name(domain);
  endpoint.tls_config(tls).map_err(|e| GrpcError::Tls {
    endpoint: uri.to_string(),
    reason: e.to_string(),
  })
}

#[cfg(not(feature = "tls"))]
fn configure_tls(_endpoint: Endpoint, uri: &str) -> GrpcResult<Endpoint> {
  Err(GrpcError::Tls {
    endpoint: uri.to_string(),
    reason: "secure credentials need the `tls` feature".to_string(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  const USER_AGENT: &str = "pubsub-rust/test";

  #[test]
  fn test_scheme_follows_credentials() {
    assert_eq!(endpoint_uri("localhost:8085", &Credentials::Insecure), "http://localhost:8085");
    assert_eq!(
      endpoint_uri("pubsub.googleapis.com", &Credentials::ApplicationDefault),
      "https://pubsub.googleapis.com"
    );
    assert_eq!(
      endpoint_uri("http://[::1]:50051", &Credentials::ApplicationDefault),
      "http://[::1]:50051"
    );
  }

  #[tokio::test]
  async fn test_invalid_uri() {
    let result = open_channel(
      "not a valid uri",
      &Credentials::Insecure,
      &ChannelConfig::default(),
      USER_AGENT,
    );
    assert!(matches!(result.unwrap_err(), GrpcError::InvalidUri { .. }));
  }

  #[tokio::test]
  async fn test_empty_endpoint_is_rejected() {
    let result = open_channel("", &Credentials::Insecure, &ChannelConfig::default(), USER_AGENT);
    assert!(matches!(result.unwrap_err(), GrpcError::InvalidConfig(_)));
  }

  #[tokio::test]
  async fn test_lazy_channel_does_not_connect() {
    // Nothing listens here, a lazy channel still opens
    let result = open_channel(
      "[::1]:9999",
      &Credentials::Insecure,
      &ChannelConfig::default(),
      USER_AGENT,
    );
    assert!(result.is_ok());
  }

  #[cfg(feature = "tls")]
  #[tokio::test]
  async fn test_secure_channel_opens_lazily() {
    let result = open_channel(
      "pubsub.googleapis.com",
      &Credentials::access_token("token"),
      &ChannelConfig::default(),
      USER_AGENT,
    );
    assert!(result.is_ok());
  }

  #[test]
  fn test_requires_runtime() {
    let result = open_channel(
      "localhost:8085",
      &Credentials::Insecure,
      &ChannelConfig::default(),
      USER_AGENT,
    );
    assert!(matches!(result.unwrap_err(), GrpcError::InvalidConfig(_)));
  }
}
