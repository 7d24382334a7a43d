//! Configuration for the marketplace service module

use serde::Deserialize;
use std::time::Duration;

/// Marketplace service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Request header every mutating call must carry
    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,

    /// Expected value of the CSRF header
    #[serde(default = "default_csrf_token")]
    pub csrf_token: String,

    /// Request header naming the acting user id
    #[serde(default = "default_user_header")]
    pub user_header: String,

    /// Page size applied when a paginate call omits `pagesize`
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Upper bound on `pagesize`
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,

    #[serde(default)]
    pub category_source: CategorySourceConfig,
}

/// External taxonomy service the category tree is refreshed from
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorySourceConfig {
    /// Base URL; `/categories` is appended
    #[serde(default = "default_category_url")]
    pub base_url: String,

    /// Sent as `X-Api-Key` when present
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csrf_header: default_csrf_header(),
            csrf_token: default_csrf_token(),
            user_header: default_user_header(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            category_source: CategorySourceConfig::default(),
        }
    }
}

impl Default for CategorySourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_category_url(),
            api_key: None,
            timeout: default_timeout(),
        }
    }
}

fn default_csrf_header() -> String {
    "x-csrf-token".to_string()
}

fn default_csrf_token() -> String {
    "marketplace".to_string()
}

fn default_user_header() -> String {
    "x-user-id".to_string()
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    100
}

fn default_category_url() -> String {
    "http://localhost:8090/api/v1".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: Config = serde_json::from_value(serde_json::json!({
            "csrf_token": "secret",
            "category_source": { "timeout": "2s" }
        }))
        .unwrap();

        assert_eq!(cfg.csrf_token, "secret");
        assert_eq!(cfg.csrf_header, "x-csrf-token");
        assert_eq!(cfg.max_page_size, 100);
        assert_eq!(cfg.category_source.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<Config, _> =
            serde_json::from_value(serde_json::json!({ "csrf": "oops" }));
        assert!(result.is_err());
    }
}
