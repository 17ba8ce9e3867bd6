//! Discord webhook notifier implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::config::NotifierConfig;
use crate::provider::CandidateResult;

use super::{Notifier, NotifyError};

const USER_AGENT: &str = concat!("ScholarWatcher/", env!("CARGO_PKG_VERSION"));

/// Discord webhook notifier.
pub struct DiscordNotifier {
    client: Client,
    config: NotifierConfig,
}

impl DiscordNotifier {
    /// Create a new DiscordNotifier with the given configuration.
    pub fn new(config: NotifierConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Format the message for one result, substituting placeholders for
    /// fields the provider did not return.
    fn format_message(keyword: &str, result: &CandidateResult) -> String {
        let title = non_empty_or(&result.title, "Untitled");
        let year = non_empty_or(&result.year, "Year n/a");
        let authors = non_empty_or(&result.authors, "Unknown authors");

        format!(
            "**New paper found** for **{}**\n**{}** ({})\n*{}*\n{}",
            keyword, title, year, authors, result.url
        )
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(&self, keyword: &str, result: &CandidateResult) -> Result<(), NotifyError> {
        if self.config.webhook_url.is_empty() {
            return Err(NotifyError::MissingWebhook);
        }

        let content = Self::format_message(keyword, result);
        let payload = json!({ "content": content });

        debug!(keyword = keyword, title = %result.title, "Sending webhook notification");

        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotifyError::Timeout
                } else {
                    NotifyError::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status().as_u16()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_full_fields() {
        let result = CandidateResult::new(
            "Graph Attention Networks",
            "https://arxiv.org/abs/1710.10903",
            "P Velickovic, G Cucurull",
            "2018",
        );
        let message = DiscordNotifier::format_message("graph neural networks", &result);

        assert!(message.contains("**New paper found** for **graph neural networks**"));
        assert!(message.contains("**Graph Attention Networks** (2018)"));
        assert!(message.contains("*P Velickovic, G Cucurull*"));
        assert!(message.contains("https://arxiv.org/abs/1710.10903"));
    }

    #[test]
    fn test_format_message_placeholders() {
        let result = CandidateResult::default();
        let message = DiscordNotifier::format_message("kw", &result);

        assert!(message.contains("**Untitled** (Year n/a)"));
        assert!(message.contains("*Unknown authors*"));
    }

    #[tokio::test]
    async fn test_missing_webhook_is_deterministic_failure() {
        let notifier = DiscordNotifier::new(NotifierConfig {
            webhook_url: String::new(),
            timeout_secs: 30,
        })
        .unwrap();

        let result = notifier
            .notify("kw", &CandidateResult::default())
            .await
            .unwrap_err();
        assert!(matches!(result, NotifyError::MissingWebhook));
        assert!(result.is_configuration());
    }
}
