//! Transport credentials shared by every channel of a client.

use std::fmt;

/// Variable consulted on every call by [`Credentials::ApplicationDefault`].
pub const ACCESS_TOKEN_ENV: &str = "CLOUD_CLIENT_ACCESS_TOKEN";

/// How channels authenticate.
///
/// One value is created per client and shared through an `Arc` by all the
/// channels in its pool, so it must be usable from many calls at once.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Plaintext HTTP/2 without authentication, used for local emulators.
    Insecure,
    /// TLS plus a bearer token discovered from the environment at call time.
    ApplicationDefault,
    /// TLS plus a fixed bearer token.
    AccessToken(String),
}

impl Credentials {
    pub fn access_token(token: impl Into<String>) -> Self {
        Self::AccessToken(token.into())
    }

    /// Whether channels built with these credentials use TLS.
    pub fn is_secure(&self) -> bool {
        !matches!(self, Credentials::Insecure)
    }

    /// URI scheme for an endpoint reached with these credentials.
    pub fn scheme(&self) -> &'static str {
        if self.is_secure() { "https" } else { "http" }
    }

    /// Bearer token for the next call, if these credentials carry one.
    ///
    /// `Ok(None)` means no authorization header is sent. A missing
    /// application-default token is reported as an error so the call fails
    /// with `UNAUTHENTICATED` instead of the client failing at construction.
    pub fn bearer_token(&self) -> Result<Option<String>, String> {
        match self {
            Credentials::Insecure => Ok(None),
            Credentials::AccessToken(token) => Ok(Some(token.clone())),
            Credentials::ApplicationDefault => core_config::env_optional(ACCESS_TOKEN_ENV)
                .filter(|token| !token.is_empty())
                .map(Some)
                .ok_or_else(|| {
                    format!("application default credentials not found, set {ACCESS_TOKEN_ENV}")
                }),
        }
    }
}

// Tokens never end up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Insecure => write!(f, "Insecure"),
            Credentials::ApplicationDefault => write!(f, "ApplicationDefault"),
            Credentials::AccessToken(_) => write!(f, "AccessToken(<redacted>)"),
        }
    }
}
