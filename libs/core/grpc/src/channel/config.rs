use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_optional};
use tonic::transport::Endpoint;

/// Overrides the connect timeout, in milliseconds.
pub const CONNECT_TIMEOUT_ENV: &str = "CLOUD_CLIENT_CONNECT_TIMEOUT_MS";

/// Overrides the HTTP/2 keep-alive interval in seconds; `0` disables pings.
pub const KEEP_ALIVE_ENV: &str = "CLOUD_CLIENT_KEEP_ALIVE_SECS";

const MB: u32 = 1024 * 1024;

/// HTTP/2 PING settings for an idle-tolerant connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAlive {
  pub interval: Duration,
  pub timeout: Duration,
  pub while_idle: bool,
}

impl KeepAlive {
  pub fn every(interval: Duration) -> Self {
    Self {
      interval,
      ..Self::default()
    }
  }
}

impl Default for KeepAlive {
  fn default() -> Self {
    Self {
      interval: Duration::from_secs(30),
      timeout: Duration::from_secs(10),
      while_idle: true,
    }
  }
}

/// Transport settings shared by every channel of a connection pool
///
/// Pull calls are long polls, so there is no channel-wide request timeout
/// unless one is set explicitly; per-call deadlines come from the
/// `CallContext`.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
  pub keep_alive: Option<KeepAlive>,
  pub connect_timeout: Duration,
  pub request_timeout: Option<Duration>,

  /// Initial HTTP/2 window for both the connection and each stream
  pub window_size: Option<u32>,
  pub adaptive_window: bool,

  pub tcp_nodelay: bool,
  pub tcp_keepalive: Option<Duration>,

  // Applied to the generated clients rather than the endpoint
  pub max_decoding_message_size: usize,
  pub max_encoding_message_size: usize,
}

impl Default for ChannelConfig {
  fn default() -> Self {
    Self {
      keep_alive: Some(KeepAlive::default()),
      connect_timeout: Duration::from_secs(5),
      request_timeout: None,
      window_size: Some(MB),
      adaptive_window: true,
      tcp_nodelay: true,
      tcp_keepalive: Some(Duration::from_secs(30)),
      max_decoding_message_size: 8 * MB as usize,
      max_encoding_message_size: 8 * MB as usize,
    }
  }
}

impl ChannelConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
    self.connect_timeout = timeout;
    self
  }

  /// Upper bound for every RPC on the channel
  ///
  /// A shorter `CallContext` deadline still wins.
  pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = Some(timeout);
    self
  }

  pub fn with_keep_alive(mut self, keep_alive: KeepAlive) -> Self {
    self.keep_alive = Some(keep_alive);
    self
  }

  pub fn without_keep_alive(mut self) -> Self {
    self.keep_alive = None;
    self
  }

  /// # Example
  /// ```ignore
  /// let config = ChannelConfig::new().with_window_size(2 * 1024 * 1024);
  /// ```
  pub fn with_window_size(mut self, size: u32) -> Self {
    self.window_size = Some(size);
    self
  }

  pub fn with_message_size_limits(mut self, max_decoding: usize, max_encoding: usize) -> Self {
    self.max_decoding_message_size = max_decoding;
    self.max_encoding_message_size = max_encoding;
    self
  }

  pub(crate) fn apply_to_endpoint(&self, endpoint: Endpoint) -> Endpoint {
    let mut endpoint = endpoint
      .connect_timeout(self.connect_timeout)
      .http2_adaptive_window(self.adaptive_window)
      .tcp_nodelay(self.tcp_nodelay)
      .tcp_keepalive(self.tcp_keepalive);

    if let Some(keep_alive) = self.keep_alive {
      endpoint = endpoint
        .http2_keep_alive_interval(keep_alive.interval)
        .keep_alive_timeout(keep_alive.timeout)
        .keep_alive_while_idle(keep_alive.while_idle);
    }
    if let Some(timeout) = self.request_timeout {
      endpoint = endpoint.timeout(timeout);
    }
    if let Some(size) = self.window_size {
      endpoint = endpoint
        .initial_connection_window_size(size)
        .initial_stream_window_size(size);
    }

    endpoint
  }
}

impl FromEnv for ChannelConfig {
  /// Defaults, with [`CONNECT_TIMEOUT_ENV`] and [`KEEP_ALIVE_ENV`] applied.
  fn from_env() -> Result<Self, ConfigError> {
    let mut config = Self::default();

    if let Some(millis) = parse_env_u64(CONNECT_TIMEOUT_ENV)? {
      config.connect_timeout = Duration::from_millis(millis);
    }
    match parse_env_u64(KEEP_ALIVE_ENV)? {
      Some(0) => config.keep_alive = None,
      Some(secs) => config.keep_alive = Some(KeepAlive::every(Duration::from_secs(secs))),
      None => {}
    }

    Ok(config)
  }
}

fn parse_env_u64(key: &str) -> Result<Option<u64>, ConfigError> {
  env_optional(key)
    .filter(|raw| !raw.trim().is_empty())
    .map(|raw| {
      raw.trim().parse().map_err(|e| ConfigError::ParseError {
        key: key.to_string(),
        details: format!("'{raw}': {e}"),
      })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_suit_long_polls() {
    let config = ChannelConfig::default();
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
    assert_eq!(config.request_timeout, None);
    assert_eq!(config.window_size, Some(1024 * 1024));
    assert_eq!(config.max_decoding_message_size, 8 * 1024 * 1024);
    assert_eq!(config.keep_alive, Some(KeepAlive::default()));
  }

  #[test]
  fn test_builders() {
    let config = ChannelConfig::new()
      .with_connect_timeout(Duration::from_secs(10))
      .with_request_timeout(Duration::from_secs(120))
      .with_keep_alive(KeepAlive::every(Duration::from_secs(45)))
      .with_window_size(2 * 1024 * 1024)
      .with_message_size_limits(16, 32);

    assert_eq!(config.connect_timeout, Duration::from_secs(10));
    assert_eq!(config.request_timeout, Some(Duration::from_secs(120)));
    assert_eq!(config.keep_alive.map(|k| k.interval), Some(Duration::from_secs(45)));
    assert_eq!(config.window_size, Some(2 * 1024 * 1024));
    assert_eq!(config.max_decoding_message_size, 16);
    assert_eq!(config.max_encoding_message_size, 32);
    assert_eq!(ChannelConfig::new().without_keep_alive().keep_alive, None);
  }

  #[test]
  fn test_from_env_overrides() {
    temp_env::with_vars(
      [(CONNECT_TIMEOUT_ENV, Some("250")), (KEEP_ALIVE_ENV, Some("0"))],
      || {
        let config = ChannelConfig::from_env().unwrap();
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
        assert_eq!(config.keep_alive, None);
      },
    );

    temp_env::with_vars_unset([CONNECT_TIMEOUT_ENV, KEEP_ALIVE_ENV], || {
      let config = ChannelConfig::from_env().unwrap();
      assert_eq!(config.connect_timeout, Duration::from_secs(5));
    });
  }

  #[test]
  fn test_from_env_rejects_garbage() {
    temp_env::with_var(KEEP_ALIVE_ENV, Some("soon"), || {
      let err = ChannelConfig::from_env().unwrap_err();
      assert!(err.to_string().contains(KEEP_ALIVE_ENV));
    });
  }
}
