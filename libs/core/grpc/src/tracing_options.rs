//! What gets traced, and how RPC payloads are rendered into log records.

use core_config::{env_list, env_or_default, ConfigError, FromEnv};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Component name that turns on the RPC logging decorators.
pub const RPC_COMPONENT: &str = "rpc";

/// Comma separated list of components to trace, e.g. `rpc`.
pub const ENABLE_TRACING_ENV: &str = "CLOUD_CLIENT_ENABLE_TRACING";

/// Comma separated `key=value` rendering settings, see [`TracingOptions::apply_settings`].
pub const TRACING_OPTIONS_ENV: &str = "CLOUD_CLIENT_TRACING_OPTIONS";

const TRUNCATED_SUFFIX: &str = "...<truncated>";

/// Tracing configuration for a client.
///
/// Controls which components emit log records and how request and response
/// payloads are rendered: string truncation, repeated field shortening and
/// fields that are never logged. Rendering works on a serialized copy, the
/// logged value itself is only borrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingOptions {
    components: BTreeSet<String>,
    single_line_mode: bool,
    truncate_string_field_longer_than: usize,
    max_repeated_elements: Option<usize>,
    omitted_fields: BTreeSet<String>,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            components: BTreeSet::new(),
            single_line_mode: true,
            truncate_string_field_longer_than: 128,
            max_repeated_elements: Some(32),
            omitted_fields: BTreeSet::new(),
        }
    }
}

impl TracingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable tracing for a component such as [`RPC_COMPONENT`].
    pub fn enable(mut self, component: impl Into<String>) -> Self {
        self.components.insert(component.into());
        self
    }

    pub fn disable(mut self, component: &str) -> Self {
        self.components.remove(component);
        self
    }

    pub fn is_enabled(&self, component: &str) -> bool {
        self.components.contains(component)
    }

    pub fn with_single_line_mode(mut self, single_line_mode: bool) -> Self {
        self.single_line_mode = single_line_mode;
        self
    }

    pub fn with_truncate_string_field_longer_than(mut self, limit: usize) -> Self {
        self.truncate_string_field_longer_than = limit;
        self
    }

    /// Keep at most `max` elements of repeated fields, `None` keeps all.
    pub fn with_max_repeated_elements(mut self, max: Option<usize>) -> Self {
        self.max_repeated_elements = max;
        self
    }

    /// Never render fields with this name, at any depth.
    pub fn omit_field(mut self, field: impl Into<String>) -> Self {
        self.omitted_fields.insert(field.into());
        self
    }

    pub fn single_line_mode(&self) -> bool {
        self.single_line_mode
    }

    pub fn truncate_string_field_longer_than(&self) -> usize {
        self.truncate_string_field_longer_than
    }

    pub fn max_repeated_elements(&self) -> Option<usize> {
        self.max_repeated_elements
    }

    /// Apply comma separated rendering settings.
    ///
    /// Recognized keys:
    /// - `single_line_mode=on|off`
    /// - `truncate_string_field_longer_than=N`
    /// - `max_repeated_elements=N|none`
    /// - `omit=FIELD` (may repeat)
    ///
    /// Unknown keys are skipped with a warning, malformed values are errors.
    pub fn apply_settings(mut self, settings: &str) -> Result<Self, ConfigError> {
        for entry in settings.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = entry.split_once('=').unwrap_or((entry, ""));
            let (key, value) = (key.trim(), value.trim());
            match key {
                "single_line_mode" => self.single_line_mode = parse_flag(key, value)?,
                "truncate_string_field_longer_than" => {
                    self.truncate_string_field_longer_than = parse_count(key, value)?
                }
                "max_repeated_elements" => {
                    self.max_repeated_elements = if value.eq_ignore_ascii_case("none") {
                        None
                    } else {
                        Some(parse_count(key, value)?)
                    }
                }
                "omit" => {
                    if value.is_empty() {
                        return Err(ConfigError::ParseError {
                            key: key.to_string(),
                            details: "expected a field name".to_string(),
                        });
                    }
                    self.omitted_fields.insert(value.to_string());
                }
                _ => {
                    tracing::warn!(target: "grpc_client", option = %entry, "Ignoring unknown tracing option");
                }
            }
        }
        Ok(self)
    }

    /// Render a payload for a log record.
    ///
    /// Never fails: a value that cannot be serialized is rendered as a
    /// placeholder so logging can't break the call being logged.
    pub fn format_payload<T>(&self, payload: &T) -> String
    where
        T: Serialize + ?Sized,
    {
        let mut value = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(e) => return format!("<unavailable: {e}>"),
        };
        self.shape(&mut value);

        let rendered = if self.single_line_mode {
            serde_json::to_string(&value)
        } else {
            serde_json::to_string_pretty(&value)
        };
        rendered.unwrap_or_else(|e| format!("<unavailable: {e}>"))
    }

    fn shape(&self, value: &mut Value) {
        match value {
            Value::String(text) => {
                let limit = self.truncate_string_field_longer_than;
                if text.chars().count() > limit {
                    let kept: String = text.chars().take(limit).collect();
                    *text = format!("{kept}{TRUNCATED_SUFFIX}");
                }
            }
            Value::Array(items) => {
                let dropped = match self.max_repeated_elements {
                    Some(max) if items.len() > max => {
                        let dropped = items.len() - max;
                        items.truncate(max);
                        dropped
                    }
                    _ => 0,
                };
                items.iter_mut().for_each(|item| self.shape(item));
                if dropped > 0 {
                    items.push(Value::String(format!("...<{dropped} more>")));
                }
            }
            Value::Object(fields) => {
                fields.retain(|name, _| !self.omitted_fields.contains(name));
                fields.values_mut().for_each(|field| self.shape(field));
            }
            _ => {}
        }
    }
}

impl FromEnv for TracingOptions {
    /// Reads [`ENABLE_TRACING_ENV`] and [`TRACING_OPTIONS_ENV`].
    fn from_env() -> Result<Self, ConfigError> {
        let options = env_list(ENABLE_TRACING_ENV)
            .into_iter()
            .fold(TracingOptions::default(), TracingOptions::enable);
        options.apply_settings(&env_or_default(TRACING_OPTIONS_ENV, ""))
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::ParseError {
            key: key.to_string(),
            details: format!("expected on/off, got '{value}'"),
        }),
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.parse().map_err(|e| ConfigError::ParseError {
        key: key.to_string(),
        details: format!("'{value}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = TracingOptions::default();
        assert!(!options.is_enabled(RPC_COMPONENT));
        assert!(options.single_line_mode());
        assert_eq!(options.truncate_string_field_longer_than(), 128);
        assert_eq!(options.max_repeated_elements(), Some(32));
    }

    #[test]
    fn test_enable_and_disable_components() {
        let options = TracingOptions::new().enable("rpc").enable("auth");
        assert!(options.is_enabled("rpc"));
        assert!(options.is_enabled("auth"));
        assert!(!options.disable("rpc").is_enabled("rpc"));
    }

    #[test]
    fn test_apply_settings() {
        let options = TracingOptions::default()
            .apply_settings("single_line_mode=off, truncate_string_field_longer_than=8,max_repeated_elements=none,omit=data")
            .unwrap();
        assert!(!options.single_line_mode());
        assert_eq!(options.truncate_string_field_longer_than(), 8);
        assert_eq!(options.max_repeated_elements(), None);
        assert_eq!(options.format_payload(&json!({"data": "x", "id": "1"})), "{\n  \"id\": \"1\"\n}");
    }

    #[test]
    fn test_apply_settings_ignores_unknown_keys() {
        let options = TracingOptions::default().apply_settings("colour=blue,,").unwrap();
        assert_eq!(options, TracingOptions::default());
    }

    #[test]
    fn test_apply_settings_rejects_malformed_values() {
        let err = TracingOptions::default()
            .apply_settings("truncate_string_field_longer_than=lots")
            .unwrap_err();
        assert!(err.to_string().contains("truncate_string_field_longer_than"));

        assert!(TracingOptions::default().apply_settings("single_line_mode=maybe").is_err());
    }

    #[test]
    fn test_apply_settings_rejects_omit_without_field() {
        for settings in ["omit=", "omit", "omit= ,single_line_mode=on"] {
            let err = TracingOptions::default().apply_settings(settings).unwrap_err();
            assert!(err.to_string().contains("omit"), "{settings}: {err}");
        }
    }

    #[test]
    fn test_long_strings_are_truncated_on_char_boundaries() {
        let options = TracingOptions::default().with_truncate_string_field_longer_than(3);
        assert_eq!(
            options.format_payload(&json!({"name": "ééééé", "short": "abc"})),
            r#"{"name":"ééé...<truncated>","short":"abc"}"#
        );
    }

    #[test]
    fn test_repeated_fields_are_shortened() {
        let options = TracingOptions::default().with_max_repeated_elements(Some(2));
        assert_eq!(
            options.format_payload(&json!({"ack_ids": ["a", "b", "c", "d"]})),
            r#"{"ack_ids":["a","b","...<2 more>"]}"#
        );
    }

    #[test]
    fn test_omitted_fields_are_dropped_at_any_depth() {
        let options = TracingOptions::default().omit_field("data");
        let rendered = options.format_payload(&json!({
            "messages": [{"data": "secret", "ordering_key": "k"}]
        }));
        assert_eq!(rendered, r#"{"messages":[{"ordering_key":"k"}]}"#);
    }

    #[test]
    fn test_large_payload_does_not_fail() {
        let options = TracingOptions::default();
        let big = "x".repeat(1 << 20);
        let rendered = options.format_payload(&json!({ "data": big }));
        assert!(rendered.len() < 256);
        assert!(rendered.contains(TRUNCATED_SUFFIX));
    }

    #[test]
    fn test_serialization_failure_becomes_placeholder() {
        struct Broken;
        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(S::Error::custom("boom"))
            }
        }
        let rendered = TracingOptions::default().format_payload(&Broken);
        assert!(rendered.starts_with("<unavailable"));
        assert!(rendered.contains("boom"));
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                (ENABLE_TRACING_ENV, Some("rpc")),
                (TRACING_OPTIONS_ENV, Some("truncate_string_field_longer_than=16")),
            ],
            || {
                let options = TracingOptions::from_env().unwrap();
                assert!(options.is_enabled(RPC_COMPONENT));
                assert_eq!(options.truncate_string_field_longer_than(), 16);
            },
        );
        temp_env::with_vars_unset([ENABLE_TRACING_ENV, TRACING_OPTIONS_ENV], || {
            assert_eq!(TracingOptions::from_env().unwrap(), TracingOptions::default());
        });
    }
}
