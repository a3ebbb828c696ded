use std::sync::Arc;

use tonic::metadata::{Ascii, MetadataValue};
use tonic::{Request, Status};

use crate::credentials::Credentials;

/// Interceptor injecting the authorization header for a client's credentials
///
/// The token is resolved on every call, so application default credentials
/// pick up a refreshed token without rebuilding the channel. A missing token
/// fails the call with `UNAUTHENTICATED`.
///
/// # Example
/// ```ignore
/// use grpc_client::interceptors::CredentialsInterceptor;
///
/// let auth = CredentialsInterceptor::new(options.credentials().clone());
/// let client = PublisherClient::with_interceptor(channel, auth);
/// ```
#[derive(Clone, Debug)]
pub struct CredentialsInterceptor {
    credentials: Arc<Credentials>,
}

impl CredentialsInterceptor {
    pub fn new(credentials: Arc<Credentials>) -> Self {
        Self { credentials }
    }
}

impl tonic::service::Interceptor for CredentialsInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let token = self
            .credentials
            .bearer_token()
            .map_err(Status::unauthenticated)?;

        if let Some(token) = token {
            let value: MetadataValue<Ascii> = format!("Bearer {token}")
                .parse()
                .map_err(|_| Status::unauthenticated("Invalid auth header"))?;
            request.metadata_mut().insert("authorization", value);
        }
        Ok(request)
    }
}

/// Interceptor stamping the client identifier into call metadata
#[derive(Clone, Debug)]
pub struct ClientHeaderInterceptor {
    api_client: MetadataValue<Ascii>,
}

impl ClientHeaderInterceptor {
    /// Header carrying the client identifier.
    pub const HEADER: &'static str = "x-goog-api-client";

    /// Characters that are not valid in metadata are replaced with `_`.
    pub fn new(user_agent: &str) -> Self {
        let sanitized: String = user_agent
            .chars()
            .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
            .collect();
        let api_client = sanitized
            .parse()
            .unwrap_or_else(|_| MetadataValue::from_static("unknown"));
        Self { api_client }
    }
}

impl tonic::service::Interceptor for ClientHeaderInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        request
            .metadata_mut()
            .insert(Self::HEADER, self.api_client.clone());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::ACCESS_TOKEN_ENV;
    use tonic::service::Interceptor;

    #[test]
    fn test_access_token_header() {
        let mut auth = CredentialsInterceptor::new(Arc::new(Credentials::access_token("test-token")));
        let req = auth.call(Request::new(())).unwrap();
        let auth_header = req.metadata().get("authorization").unwrap();
        assert_eq!(auth_header, "Bearer test-token");
    }

    #[test]
    fn test_insecure_sends_no_header() {
        let mut auth = CredentialsInterceptor::new(Arc::new(Credentials::Insecure));
        let req = auth.call(Request::new(())).unwrap();
        assert!(req.metadata().get("authorization").is_none());
    }

    #[test]
    fn test_application_default_token_resolved_per_call() {
        let mut auth = CredentialsInterceptor::new(Arc::new(Credentials::ApplicationDefault));

        temp_env::with_var(ACCESS_TOKEN_ENV, Some("first"), || {
            let req = auth.call(Request::new(())).unwrap();
            assert_eq!(req.metadata().get("authorization").unwrap(), "Bearer first");
        });
        temp_env::with_var(ACCESS_TOKEN_ENV, Some("second"), || {
            let req = auth.call(Request::new(())).unwrap();
            assert_eq!(req.metadata().get("authorization").unwrap(), "Bearer second");
        });
    }

    #[test]
    fn test_missing_token_is_unauthenticated() {
        let mut auth = CredentialsInterceptor::new(Arc::new(Credentials::ApplicationDefault));
        temp_env::with_var_unset(ACCESS_TOKEN_ENV, || {
            let status = auth.call(Request::new(())).unwrap_err();
            assert_eq!(status.code(), tonic::Code::Unauthenticated);
        });
    }

    #[test]
    fn test_client_header() {
        let mut header = ClientHeaderInterceptor::new("pubsub-rust/0.1.0");
        let req = header.call(Request::new(())).unwrap();
        assert_eq!(
            req.metadata().get(ClientHeaderInterceptor::HEADER).unwrap(),
            "pubsub-rust/0.1.0"
        );
    }

    #[test]
    fn test_client_header_sanitizes_value() {
        let mut header = ClientHeaderInterceptor::new("cbt-rust/1.0\n");
        let req = header.call(Request::new(())).unwrap();
        assert_eq!(
            req.metadata().get(ClientHeaderInterceptor::HEADER).unwrap(),
            "cbt-rust/1.0_"
        );
    }
}
