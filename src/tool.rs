//! The tool invocation contract.
//!
//! A tool is declared as data: an argument type, a validator, a prompt
//! template and a payload shape. [`invoke`] runs the one control flow every
//! tool shares:
//!
//! validate -> render prompt -> one remote call (bounded by a timeout)
//! -> normalize -> shape the success payload.
//!
//! `invoke` is total. Every failure ends up in [`ToolResult::Error`].

use crate::config::Prompts;
use crate::envelope::ToolResult;
use crate::error::UshauriError;
use crate::model::{Prompt, TextGenerator};
use crate::normalize::{normalize, RAW_RESPONSE_KEY};
use crate::validate::Check;
use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};
use async_trait::async_trait;
use chrono::{FixedOffset, Offset, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// East Africa Time, UTC+03:00 all year (Africa/Nairobi).
const EAT_OFFSET_SECS: i32 = 3 * 3600;

/// Everything a tool needs at call time.
#[derive(Clone)]
pub struct ToolContext {
    pub generator: Arc<dyn TextGenerator>,
    pub prompts: Arc<Prompts>,
    pub timeout: Duration,
}

impl ToolContext {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: Prompts, timeout: Duration) -> Self {
        Self {
            generator,
            prompts: Arc::new(prompts),
            timeout,
        }
    }
}

/// A named tool with typed arguments.
pub trait Tool: Send + Sync + 'static {
    type Args: DeserializeOwned + Send + Sync;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema of the arguments object.
    fn parameters(&self) -> Value;

    /// Prefix for remote-call failure messages, e.g. "Guidance failed".
    fn failure_prefix(&self) -> &'static str;

    /// Key holding the raw text when the model output is not JSON.
    fn fallback_key(&self) -> &'static str {
        RAW_RESPONSE_KEY
    }

    fn validate(&self, args: &Self::Args) -> Check;

    /// Render the prompt. Pure; never fails once `validate` has passed.
    fn render(&self, args: &Self::Args, prompts: &Prompts) -> Prompt;

    /// Wrap the normalized model output into the success envelope.
    fn shape(&self, args: &Self::Args, content: Value) -> ToolResult;
}

/// Run a tool end to end. Never panics, never returns `Err`.
#[instrument(skip_all, fields(tool = tool.name()))]
pub async fn invoke<T: Tool>(tool: &T, args: &T::Args, ctx: &ToolContext) -> ToolResult {
    if let Err(message) = tool.validate(args) {
        warn!("Rejected {} call: {}", tool.name(), message);
        return ToolResult::error(message);
    }

    let prompt = tool.render(args, &ctx.prompts);
    debug!("Rendered prompt ({} chars)", prompt.as_str().len());

    let raw = match tokio::time::timeout(ctx.timeout, ctx.generator.generate(&prompt)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Remote call for {} failed: {}", tool.name(), e);
            return ToolResult::error(format!("{}: {}", tool.failure_prefix(), e.detail()));
        }
        Err(_) => {
            let e = UshauriError::Timeout(ctx.timeout);
            warn!("Remote call for {} failed: {}", tool.name(), e);
            return ToolResult::error(format!("{}: {}", tool.failure_prefix(), e.detail()));
        }
    };

    let normalized = normalize(&raw, tool.fallback_key());
    info!(
        "{} completed ({})",
        tool.name(),
        if normalized.is_decoded() { "decoded" } else { "raw fallback" }
    );
    tool.shape(args, normalized.into_value())
}

/// Object-safe view of a tool, dispatched by name with JSON arguments.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn tool_name(&self) -> &'static str;

    /// Function definition for a chat completions `tools` list.
    fn definition(&self) -> ChatCompletionTool;

    /// Decode `args` and invoke. Bad argument shapes become an error envelope.
    async fn call_json(&self, args: Value, ctx: &ToolContext) -> ToolResult;
}

#[async_trait]
impl<T: Tool> ToolHandler for T {
    fn tool_name(&self) -> &'static str {
        Tool::name(self)
    }

    fn definition(&self) -> ChatCompletionTool {
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: Tool::name(self).to_string(),
                description: Some(self.description().to_string()),
                parameters: Some(self.parameters()),
                strict: None,
            },
        }
    }

    async fn call_json(&self, args: Value, ctx: &ToolContext) -> ToolResult {
        let args = if args.is_null() {
            Value::Object(Default::default())
        } else {
            args
        };

        match serde_json::from_value::<T::Args>(args) {
            Ok(typed) => invoke(self, &typed, ctx).await,
            Err(e) => {
                let err = UshauriError::InvalidArguments {
                    tool: Tool::name(self).to_string(),
                    reason: e.to_string(),
                };
                warn!("{}", err);
                ToolResult::error(err.to_string())
            }
        }
    }
}

/// Current time in East Africa Time as RFC 3339.
pub fn east_africa_now() -> String {
    let offset = FixedOffset::east_opt(EAT_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    Utc::now().with_timezone(&offset).to_rfc3339()
}

/// Render a structured record the way it appears inside prompts.
pub fn pretty_record(record: &serde_json::Map<String, Value>) -> String {
    serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
}

/// Default language for tools that accept one.
pub fn default_language() -> String {
    "en".to_string()
}
