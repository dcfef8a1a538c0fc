//! OpenAI-compatible client construction from model settings.

use crate::config::ModelSettings;
use crate::error::{Result, UshauriError};
use async_openai::{config::OpenAIConfig, Client};

/// Create a client for the configured endpoint.
///
/// Fails when the credential variable is unset, so callers should build the
/// client once at startup.
pub fn create_client(settings: &ModelSettings) -> Result<Client<OpenAIConfig>> {
    let api_key = settings.api_key()?;

    let http_client = reqwest::Client::builder()
        .timeout(settings.timeout())
        .build()
        .map_err(|e| UshauriError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new()
        .with_api_base(settings.api_base.trim_end_matches('/'))
        .with_api_key(api_key);

    Ok(Client::with_config(config).with_http_client(http_client))
}
