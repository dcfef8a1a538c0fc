//! Agent runner with tool calling loop.

use crate::agents::AgentDescriptor;
use crate::config::ModelSettings;
use crate::envelope::ToolResult;
use crate::error::{Result, UshauriError};
use crate::openai::create_client;
use crate::tool::ToolContext;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Agent that lets the model pick tools from its descriptor.
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    descriptor: Arc<AgentDescriptor>,
    context: ToolContext,
    temperature: f32,
    max_iterations: usize,
}

impl Agent {
    /// Create a new agent. Fails if the model credential is missing.
    pub fn new(
        descriptor: Arc<AgentDescriptor>,
        context: ToolContext,
        settings: &ModelSettings,
    ) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
            descriptor,
            context,
            temperature: settings.temperature,
            max_iterations: 15,
        })
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the agent with a user task.
    #[instrument(skip(self, task), fields(agent = self.descriptor.name))]
    pub async fn run(&self, task: &str) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.descriptor.instruction.clone())
                .build()
                .map_err(|e| UshauriError::Agent(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(task)
                .build()
                .map_err(|e| UshauriError::Agent(e.to_string()))?
                .into(),
        ];

        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(UshauriError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.descriptor.model)
                .messages(messages.clone())
                .tools(self.descriptor.tool_definitions())
                .temperature(self.temperature)
                .build()
                .map_err(|e| UshauriError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| UshauriError::OpenAI(format!("Agent API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| UshauriError::Agent("No response from model".to_string()))?;

            let tool_calls = match &choice.message.tool_calls {
                Some(calls) if !calls.is_empty() => calls,
                _ => {
                    return Ok(AgentResponse {
                        content: choice.message.content.clone().unwrap_or_default(),
                        tool_calls: tool_calls_made,
                        iterations,
                    })
                }
            };

            let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                .tool_calls(tool_calls.clone())
                .build()
                .map_err(|e| UshauriError::Agent(e.to_string()))?;
            messages.push(assistant_msg.into());

            for tool_call in tool_calls {
                let record = self.execute_tool_call(tool_call).await;

                let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(&tool_call.id)
                    .content(record.result.clone())
                    .build()
                    .map_err(|e| UshauriError::Agent(e.to_string()))?;
                messages.push(tool_msg.into());

                tool_calls_made.push(record);
            }
        }
    }

    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> ToolCallRecord {
        dispatch(
            &self.descriptor,
            &self.context,
            &tool_call.function.name,
            &tool_call.function.arguments,
        )
        .await
    }
}

/// Run one model-requested tool call. Always yields an envelope as JSON text.
pub async fn dispatch(
    descriptor: &AgentDescriptor,
    context: &ToolContext,
    name: &str,
    arguments: &str,
) -> ToolCallRecord {
    info!("Agent calling tool: {} with args: {}", name, arguments);

    let result = match serde_json::from_str::<Value>(arguments) {
        Ok(args) => descriptor.call(name, args, context).await,
        Err(e) => ToolResult::error(
            UshauriError::InvalidArguments {
                tool: name.to_string(),
                reason: e.to_string(),
            }
            .to_string(),
        ),
    };

    ToolCallRecord {
        name: name.to_string(),
        arguments: arguments.to_string(),
        result: result.to_json().to_string(),
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// The tool's envelope, serialized.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}
