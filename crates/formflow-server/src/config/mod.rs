// SPDX-License-Identifier: Apache-2.0

use crate::upstream::RetryPolicy;
use formflow_query::TargetingPolicy;
use serde::Serialize;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";

/// Origins the browser client is served from.
pub const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:4000",
    "https://your-frontend-domain.com",
    "https://sc.ecombullet.com",
];

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    #[serde(skip_serializing)]
    pub token_secret: Option<String>,
    pub token_ttl: Duration,
    pub cors_allowed_origins: Vec<String>,
    pub external_totalusers_url: Option<String>,
    pub external_retry: RetryPolicy,
    pub external_timeout: Duration,
    pub targeting_level_override: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 1024 * 1024,
            token_secret: None,
            token_ttl: Duration::from_secs(86_400),
            cors_allowed_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| (*o).to_string()).collect(),
            external_totalusers_url: None,
            external_retry: RetryPolicy::default(),
            external_timeout: Duration::from_secs(10),
            targeting_level_override: None,
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn targeting_policy(&self) -> TargetingPolicy {
        TargetingPolicy {
            level_override: self.targeting_level_override.clone(),
        }
    }

    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_body_bytes == 0 {
            return Err("max_body_bytes must be > 0".to_string());
        }
        if self.token_ttl.is_zero() {
            return Err("token_ttl must be > 0".to_string());
        }
        if self.external_retry.max_attempts == 0 {
            return Err("external retry attempts must be > 0".to_string());
        }
        if let Some(secret) = &self.token_secret {
            if secret.len() < 16 {
                return Err("token secret must be at least 16 bytes".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_hide_the_secret() {
        let cfg = ApiConfig {
            token_secret: Some("0123456789abcdef".into()),
            ..ApiConfig::default()
        };
        assert!(cfg.validate().is_ok());
        let json = serde_json::to_value(&cfg).expect("json");
        assert!(json.get("token_secret").is_none());
        assert_eq!(json["cors_allowed_origins"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn rejects_short_secrets_and_zero_limits() {
        let cfg = ApiConfig {
            token_secret: Some("short".into()),
            ..ApiConfig::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = ApiConfig {
            max_body_bytes: 0,
            ..ApiConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
