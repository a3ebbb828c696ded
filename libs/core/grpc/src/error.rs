use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors raised while assembling channels and stubs.
///
/// These only happen at construction time. Failures of individual calls are
/// reported as `tonic::Status` values by the stubs themselves.
#[derive(Error, Debug)]
pub enum GrpcError {
  /// Invalid URI provided for a channel
  #[error("Invalid URI '{uri}': {source}")]
  InvalidUri {
    uri: String,
    #[source]
    source: tonic::transport::Error,
  },

  /// TLS could not be configured for a secure channel
  #[error("TLS configuration failed for '{endpoint}': {reason}")]
  Tls { endpoint: String, reason: String },

  /// Invalid configuration
  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),
}

// Implement conversion to tonic::Status for callers that report assembly
// failures through an RPC surface
impl From<GrpcError> for tonic::Status {
  fn from(err: GrpcError) -> Self {
    match err {
      GrpcError::InvalidUri { .. } | GrpcError::InvalidConfig(_) => {
        tonic::Status::invalid_argument(err.to_string())
      }
      GrpcError::Tls { .. } => tonic::Status::unavailable(err.to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invalid_config_maps_to_invalid_argument() {
    let status: tonic::Status = GrpcError::InvalidConfig("empty pool".to_string()).into();
    assert_eq!(status.code(), tonic::Code::InvalidArgument);
    assert!(status.message().contains("empty pool"));
  }

  #[test]
  fn test_tls_maps_to_unavailable() {
    let status: tonic::Status = GrpcError::Tls {
      endpoint: "pubsub.googleapis.com".to_string(),
      reason: "no roots".to_string(),
    }
    .into();
    assert_eq!(status.code(), tonic::Code::Unavailable);
  }
}
