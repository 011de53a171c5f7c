//! Global configuration types for Verdant.
//!
//! `GlobalConfig` represents the top-level `config.toml` that points the
//! client at its remote services.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Verdant client.
///
/// Loaded from `~/.verdant/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Base URL of the chat and title services.
    #[serde(default = "default_chat_api_url")]
    pub chat_api_url: String,

    /// Base URL of the glossary and search services.
    #[serde(default = "default_glossary_api_url")]
    pub glossary_api_url: String,

    /// Per-request timeout in seconds. Unset leaves the transport default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_chat_api_url() -> String {
    "https://capst.onrender.com".to_string()
}

fn default_glossary_api_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            chat_api_url: default_chat_api_url(),
            glossary_api_url: default_glossary_api_url(),
            request_timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.chat_api_url, "https://capst.onrender.com");
        assert_eq!(config.glossary_api_url, "http://127.0.0.1:5000");
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
chat_api_url = "http://localhost:8080"
request_timeout_secs = 30
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chat_api_url, "http://localhost:8080");
        assert_eq!(config.glossary_api_url, "http://127.0.0.1:5000");
        assert_eq!(config.request_timeout_secs, Some(30));
    }
}
