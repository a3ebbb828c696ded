pub mod tracing;

use std::env;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment, selects the log format of the process-wide sink
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development, // Local runs and emulators
    Production,  // Deployed clients
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Returns the variable's value when it is set, even if empty.
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Splits a comma separated variable into trimmed, non-empty entries.
pub fn env_list(key: &str) -> Vec<String> {
    env_optional(key)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("CFG_TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("CFG_TEST_VAR", "default"), "test_value");
        });
        temp_env::with_var_unset("CFG_TEST_VAR", || {
            assert_eq!(env_or_default("CFG_TEST_VAR", "default"), "default");
        });
    }

    #[test]
    fn test_env_optional_keeps_empty_value() {
        temp_env::with_var("CFG_OPTIONAL", Some(""), || {
            assert_eq!(env_optional("CFG_OPTIONAL"), Some(String::new()));
        });
        temp_env::with_var_unset("CFG_OPTIONAL", || {
            assert_eq!(env_optional("CFG_OPTIONAL"), None);
        });
    }

    #[test]
    fn test_env_list_splits_and_trims() {
        temp_env::with_var("CFG_LIST", Some(" rpc, ,auth ,"), || {
            assert_eq!(env_list("CFG_LIST"), vec!["rpc", "auth"]);
        });
        temp_env::with_var_unset("CFG_LIST", || {
            assert!(env_list("CFG_LIST").is_empty());
        });
    }
}
