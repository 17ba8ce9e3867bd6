use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub watcher: WatcherConfig,
    /// Keywords preloaded at startup (idempotent; existing terms are kept).
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("scholar-watcher.db")
}

/// Search provider (SerpAPI Google Scholar) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// SerpAPI API key. Empty means unconfigured; every fetch fails.
    #[serde(default)]
    pub api_key: String,
    /// SerpAPI endpoint.
    #[serde(default = "default_provider_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_provider_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_provider_url() -> String {
    "https://serpapi.com/search.json".to_string()
}

/// Notification (Discord webhook) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifierConfig {
    /// Discord webhook URL. Empty means unconfigured; every delivery fails.
    #[serde(default)]
    pub webhook_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u32 {
    30
}

/// Cycle runner and scheduler configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatcherConfig {
    /// Minutes between scheduled cycles. 0 disables the interval timer
    /// (cycles then run only on demand).
    #[serde(default = "default_schedule_minutes")]
    pub schedule_minutes: u32,
    /// Maximum candidate results fetched per keyword per cycle.
    #[serde(default = "default_per_keyword_limit")]
    pub per_keyword_limit: u32,
    /// Pacing delay between keywords in milliseconds (provider courtesy,
    /// not a correctness requirement).
    #[serde(default = "default_keyword_pace_ms")]
    pub keyword_pace_ms: u64,
    /// Default item count for the RSS feed.
    #[serde(default = "default_rss_limit")]
    pub rss_limit: u32,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            schedule_minutes: default_schedule_minutes(),
            per_keyword_limit: default_per_keyword_limit(),
            keyword_pace_ms: default_keyword_pace_ms(),
            rss_limit: default_rss_limit(),
        }
    }
}

fn default_schedule_minutes() -> u32 {
    15
}

fn default_per_keyword_limit() -> u32 {
    10
}

fn default_keyword_pace_ms() -> u64 {
    1000
}

fn default_rss_limit() -> u32 {
    100
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub provider: SanitizedProviderConfig,
    pub notifier: SanitizedNotifierConfig,
    pub watcher: WatcherConfig,
}

/// Sanitized provider config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedProviderConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

/// Sanitized notifier config (webhook URL hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedNotifierConfig {
    pub webhook_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            provider: SanitizedProviderConfig {
                base_url: config.provider.base_url.clone(),
                api_key_configured: !config.provider.api_key.is_empty(),
                timeout_secs: config.provider.timeout_secs,
            },
            notifier: SanitizedNotifierConfig {
                webhook_configured: !config.notifier.webhook_url.is_empty(),
                timeout_secs: config.notifier.timeout_secs,
            },
            watcher: config.watcher.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.watcher.schedule_minutes, 15);
        assert_eq!(config.watcher.per_keyword_limit, 10);
        assert!(config.keywords.is_empty());
        assert!(config.provider.api_key.is_empty());
    }

    #[test]
    fn test_sanitized_config_redacts_secrets() {
        let mut config = Config::default();
        config.provider.api_key = "secret-key".to_string();
        config.notifier.webhook_url = "https://discord.com/api/webhooks/x/y".to_string();

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.provider.api_key_configured);
        assert!(sanitized.notifier.webhook_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-key"));
        assert!(!json.contains("webhooks/x/y"));
    }

    #[test]
    fn test_sanitized_config_reports_missing() {
        let sanitized = SanitizedConfig::from(&Config::default());
        assert!(!sanitized.provider.api_key_configured);
        assert!(!sanitized.notifier.webhook_configured);
    }
}
