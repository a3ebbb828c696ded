//! Per-client configuration, resolved once from the environment.

use std::sync::Arc;

use core_config::{env_optional, FromEnv};

use crate::channel::ChannelConfig;
use crate::credentials::Credentials;
use crate::pool_size::compute_default_pool_size;
use crate::tracing_options::TracingOptions;

/// Static defaults of one remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceProfile {
  pub data_endpoint: &'static str,
  pub admin_endpoint: &'static str,
  /// Variable that routes all traffic to a local emulator when set.
  pub emulator_env: &'static str,
  pub user_agent_prefix: &'static str,
}

impl ServiceProfile {
  /// The distributed key-value store.
  pub const KEY_VALUE: ServiceProfile = ServiceProfile {
    data_endpoint: "bigtable.googleapis.com",
    admin_endpoint: "bigtableadmin.googleapis.com",
    emulator_env: "BIGTABLE_EMULATOR_HOST",
    user_agent_prefix: "cbt-rust",
  };

  /// The publish/subscribe message bus.
  pub const PUBSUB: ServiceProfile = ServiceProfile {
    data_endpoint: "pubsub.googleapis.com",
    admin_endpoint: "pubsub.googleapis.com",
    emulator_env: "PUBSUB_EMULATOR_HOST",
    user_agent_prefix: "pubsub-rust",
  };

  /// Current emulator target, if the override is set to a non-empty value.
  pub fn emulator_target(&self) -> Option<String> {
    env_optional(self.emulator_env).filter(|target| !target.is_empty())
  }
}

/// Configuration shared by every channel and stub of one client.
///
/// Built once, then read-only. The credentials are shared through an `Arc`
/// by all channels in the pool.
///
/// # Example
/// ```ignore
/// use grpc_client::{ClientOptions, ServiceProfile, RPC_COMPONENT};
///
/// let options = ClientOptions::for_service(ServiceProfile::PUBSUB)
///     .with_connection_pool_size(2)
///     .enable_tracing(RPC_COMPONENT);
/// ```
#[derive(Debug, Clone)]
pub struct ClientOptions {
  credentials: Arc<Credentials>,
  connection_pool_size: usize,
  data_endpoint: String,
  admin_endpoint: String,
  user_agent: String,
  tracing_options: TracingOptions,
  channel_config: ChannelConfig,
}

impl Default for ClientOptions {
  fn default() -> Self {
    Self::new()
  }
}

impl ClientOptions {
  /// Options for the key-value store with credentials picked from the environment.
  pub fn new() -> Self {
    Self::for_service(ServiceProfile::KEY_VALUE)
  }

  /// Options for `profile` with credentials picked from the environment:
  /// insecure when the emulator override is set, application default otherwise.
  pub fn for_service(profile: ServiceProfile) -> Self {
    Self::resolve(profile, None, profile.emulator_target().as_deref())
  }

  /// Options for `profile` with explicit credentials.
  ///
  /// The emulator override still wins: with it set, the channels are
  /// plaintext and the supplied credentials are not used.
  pub fn with_credentials(profile: ServiceProfile, credentials: Credentials) -> Self {
    Self::resolve(profile, Some(credentials), profile.emulator_target().as_deref())
  }

  /// Resolve options with the emulator override passed in explicitly.
  ///
  /// Tracing options and channel settings are still read from the
  /// environment.
  pub fn resolve(
    profile: ServiceProfile,
    credentials: Option<Credentials>,
    emulator: Option<&str>,
  ) -> Self {
    let emulator = emulator.filter(|target| !target.is_empty());

    let credentials = match (credentials, emulator) {
      (None, Some(_)) => Credentials::Insecure,
      (None, None) => Credentials::ApplicationDefault,
      (Some(supplied), Some(target)) => {
        tracing::debug!(
          target: "grpc_client",
          credentials = ?supplied,
          emulator = %target,
          "Emulator override active, using insecure credentials"
        );
        Credentials::Insecure
      }
      (Some(supplied), None) => supplied,
    };

    let tracing_options = TracingOptions::from_env().unwrap_or_else(|e| {
      tracing::warn!(target: "grpc_client", error = %e, "Invalid tracing options, using defaults");
      TracingOptions::default()
    });

    let channel_config = ChannelConfig::from_env().unwrap_or_else(|e| {
      tracing::warn!(target: "grpc_client", error = %e, "Invalid channel settings, using defaults");
      ChannelConfig::default()
    });

    let mut options = Self {
      credentials: Arc::new(credentials),
      connection_pool_size: compute_default_pool_size(),
      data_endpoint: profile.data_endpoint.to_string(),
      admin_endpoint: profile.admin_endpoint.to_string(),
      user_agent: format!("{}/{}", profile.user_agent_prefix, env!("CARGO_PKG_VERSION")),
      tracing_options,
      channel_config,
    };

    if let Some(target) = emulator {
      options.data_endpoint = target.to_string();
      options.admin_endpoint = target.to_string();
    }
    options
  }

  pub fn with_data_endpoint(mut self, endpoint: impl Into<String>) -> Self {
    self.data_endpoint = endpoint.into();
    self
  }

  pub fn with_admin_endpoint(mut self, endpoint: impl Into<String>) -> Self {
    self.admin_endpoint = endpoint.into();
    self
  }

  /// Number of channels to open; zero is raised to one.
  pub fn with_connection_pool_size(mut self, size: usize) -> Self {
    self.connection_pool_size = size.max(1);
    self
  }

  pub fn with_tracing_options(mut self, tracing_options: TracingOptions) -> Self {
    self.tracing_options = tracing_options;
    self
  }

  /// Turn on tracing for a component, keeping the other tracing settings.
  pub fn enable_tracing(mut self, component: impl Into<String>) -> Self {
    self.tracing_options = self.tracing_options.enable(component);
    self
  }

  pub fn with_channel_config(mut self, channel_config: ChannelConfig) -> Self {
    self.channel_config = channel_config;
    self
  }

  pub fn credentials(&self) -> &Arc<Credentials> {
    &self.credentials
  }

  pub fn connection_pool_size(&self) -> usize {
    self.connection_pool_size
  }

  pub fn data_endpoint(&self) -> &str {
    &self.data_endpoint
  }

  pub fn admin_endpoint(&self) -> &str {
    &self.admin_endpoint
  }

  /// Client identifier sent with every request.
  pub fn user_agent(&self) -> &str {
    &self.user_agent
  }

  pub fn tracing_options(&self) -> &TracingOptions {
    &self.tracing_options
  }

  pub fn channel_config(&self) -> &ChannelConfig {
    &self.channel_config
  }
}
