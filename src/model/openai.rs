//! OpenAI-compatible chat completion generator.

use super::{Prompt, TextGenerator};
use crate::config::ModelSettings;
use crate::error::{Result, UshauriError};
use crate::openai::create_client;
use async_openai::types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Generator backed by a chat completions endpoint.
pub struct OpenAIGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIGenerator {
    /// Build a generator from model settings. Fails if the credential is missing.
    pub fn from_settings(settings: &ModelSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            model: settings.name.clone(),
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAIGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.as_str().len()))]
    async fn generate(&self, prompt: &Prompt) -> Result<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt.as_str())
            .build()
            .map_err(|e| UshauriError::Remote(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message.into()])
            .temperature(self.temperature)
            .build()
            .map_err(|e| UshauriError::Remote(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| UshauriError::OpenAI(e.to_string()))?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| UshauriError::Remote("Empty response from model".to_string()))?
            .clone();

        debug!("Model returned {} bytes", text.len());
        Ok(text)
    }
}
