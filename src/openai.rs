//! OpenAI-compatible client configuration.

use crate::config::LlmSettings;
use crate::error::{RegnError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for chat API requests (2 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Create a chat client from the LLM settings.
///
/// The API key is read from the environment variable named in the
/// settings; a missing or empty key is a configuration error.
pub fn create_client(llm: &LlmSettings) -> Result<Client<OpenAIConfig>> {
    let api_key = match std::env::var(&llm.api_key_env) {
        Ok(key) if !key.is_empty() => key,
        _ => {
            return Err(RegnError::Config(format!(
                "{} environment variable is not set",
                llm.api_key_env
            )))
        }
    };

    Ok(create_client_for_base(&llm.base_url, &api_key))
}

/// Create a chat client for a specific API base and key.
pub fn create_client_for_base(base_url: &str, api_key: &str) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client");

    let config = OpenAIConfig::new()
        .with_api_base(base_url)
        .with_api_key(api_key);

    Client::with_config(config).with_http_client(http_client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_fails_without_key() {
        let llm = LlmSettings {
            api_key_env: "REGN_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..LlmSettings::default()
        };
        let err = create_client(&llm).unwrap_err();
        assert!(matches!(err, RegnError::Config(_)));
        assert!(err.to_string().contains("REGN_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
