use std::{env, time::Duration};

use thiserror::Error;

/// Errors raised while loading [`Config`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// DynamoDB table holding the items.
    pub table_name: String,
    /// Global secondary index keyed on `todoId`.
    pub index_name: String,
    /// S3 bucket holding attachments.
    pub bucket_name: String,
    /// Lifetime of pre-signed attachment URLs.
    pub signed_url_expiration: Duration,
    /// Custom endpoint for local DynamoDB/S3 emulators.
    pub endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required, without defaults:
    /// - `TODOS_TABLE` - DynamoDB table name
    /// - `INDEX_NAME` - secondary index on `todoId`
    /// - `TODO_IMAGES_S3_BUCKET` - attachment bucket
    /// - `SIGNED_URL_EXPIRATION` - signed URL lifetime in seconds
    ///
    /// Optional:
    /// - `AWS_ENDPOINT_URL` - endpoint override for local emulators
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let expiration = required("SIGNED_URL_EXPIRATION")?;
        let seconds = parse_expiration(&expiration)?;

        Ok(Self {
            table_name: required("TODOS_TABLE")?,
            index_name: required("INDEX_NAME")?,
            bucket_name: required("TODO_IMAGES_S3_BUCKET")?,
            signed_url_expiration: Duration::from_secs(seconds),
            endpoint_url: lookup("AWS_ENDPOINT_URL").filter(|v| !v.trim().is_empty()),
        })
    }
}

fn parse_expiration(value: &str) -> Result<u64, ConfigError> {
    let invalid = |reason| ConfigError::Invalid {
        name: "SIGNED_URL_EXPIRATION",
        value: value.to_string(),
        reason,
    };

    let seconds: u64 = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;

    if seconds == 0 {
        return Err(invalid("must be greater than zero"));
    }

    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn complete() -> HashMap<String, String> {
        vars(&[
            ("TODOS_TABLE", "Todos-dev"),
            ("INDEX_NAME", "TodoIdIndex"),
            ("TODO_IMAGES_S3_BUCKET", "todo-images-dev"),
            ("SIGNED_URL_EXPIRATION", "300"),
        ])
    }

    #[test]
    fn test_loads_complete_config() {
        let env = complete();
        let config = Config::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.table_name, "Todos-dev");
        assert_eq!(config.index_name, "TodoIdIndex");
        assert_eq!(config.bucket_name, "todo-images-dev");
        assert_eq!(config.signed_url_expiration, Duration::from_secs(300));
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn test_endpoint_override() {
        let mut env = complete();
        env.insert(
            "AWS_ENDPOINT_URL".to_string(),
            "http://localhost:4566".to_string(),
        );

        let config = Config::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_every_required_variable_has_no_default() {
        for name in [
            "TODOS_TABLE",
            "INDEX_NAME",
            "TODO_IMAGES_S3_BUCKET",
            "SIGNED_URL_EXPIRATION",
        ] {
            let mut env = complete();
            env.remove(name);

            let result = Config::from_lookup(|k| env.get(k).cloned());

            assert_eq!(result, Err(ConfigError::Missing(name)));
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut env = complete();
        env.insert("TODOS_TABLE".to_string(), "  ".to_string());

        let result = Config::from_lookup(|k| env.get(k).cloned());

        assert_eq!(result, Err(ConfigError::Missing("TODOS_TABLE")));
    }

    #[test]
    fn test_non_numeric_expiration() {
        let mut env = complete();
        env.insert("SIGNED_URL_EXPIRATION".to_string(), "5m".to_string());

        let result = Config::from_lookup(|k| env.get(k).cloned());

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "SIGNED_URL_EXPIRATION",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_expiration() {
        let mut env = complete();
        env.insert("SIGNED_URL_EXPIRATION".to_string(), "0".to_string());

        let result = Config::from_lookup(|k| env.get(k).cloned());

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
