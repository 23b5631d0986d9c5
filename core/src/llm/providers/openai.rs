//! OpenAI-compatible and Azure OpenAI clients built on the async-openai library

use crate::config::ResolvedLlmConfig;
use crate::error::{ConfigError, LlmError, Result};
use crate::llm::{
    ChatOptions, ContentBlock, FinishReason, LlmClient, LlmMessage, LlmResponse, MessageContent,
    MessageRole, ToolDefinition, Usage,
};
use async_openai::{
    config::{AzureConfig, OpenAIConfig},
    types::{
        ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessage,
        ChatCompletionRequestAssistantMessageContent, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestToolMessage,
        ChatCompletionRequestToolMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionTool, ChatCompletionToolType, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, FunctionObject,
    },
    Client,
};
use async_trait::async_trait;
use serde_json::Value;

/// Client for OpenAI-compatible endpoints
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

/// Client for Azure OpenAI deployments
#[derive(Debug)]
pub struct AzureOpenAiClient {
    client: Client<AzureConfig>,
    model: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client from a resolved LLM config
    pub fn new(config: &ResolvedLlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::Authentication {
                message: "No API key found for OpenAI".to_string(),
            }
            .into());
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.endpoint);

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model.clone(),
        })
    }
}

impl AzureOpenAiClient {
    /// Create a new Azure OpenAI client from a resolved LLM config.
    ///
    /// Azure requires the api-version query parameter on every request, so
    /// the config must carry one. The model name doubles as the deployment.
    pub fn new(config: &ResolvedLlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::Authentication {
                message: "No API key found for Azure OpenAI".to_string(),
            }
            .into());
        }

        let Some(api_version) = config.api_version.as_deref() else {
            return Err(ConfigError::MissingField {
                field: "api_version".to_string(),
            }
            .into());
        };

        let azure_config = AzureConfig::new()
            .with_api_base(&config.endpoint)
            .with_api_version(api_version)
            .with_deployment_id(&config.model)
            .with_api_key(&config.api_key);

        Ok(Self {
            client: Client::with_config(azure_config),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat_completion(
        &self,
        messages: Vec<LlmMessage>,
        tools: Option<Vec<ToolDefinition>>,
        options: Option<ChatOptions>,
    ) -> Result<LlmResponse> {
        let request = build_request(&self.model, messages, tools, options)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!("OpenAI API call failed: {}", e);
            LlmError::ApiError {
                status: 500, // async-openai doesn't expose status codes directly
                message: e.to_string(),
            }
        })?;

        convert_response(response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

#[async_trait]
impl LlmClient for AzureOpenAiClient {
    async fn chat_completion(
        &self,
        messages: Vec<LlmMessage>,
        tools: Option<Vec<ToolDefinition>>,
        options: Option<ChatOptions>,
    ) -> Result<LlmResponse> {
        let request = build_request(&self.model, messages, tools, options)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!("Azure OpenAI API call failed: {}", e);
            LlmError::ApiError {
                status: 500,
                message: e.to_string(),
            }
        })?;

        convert_response(response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "azure_openai"
    }
}

/// Build a chat completion request in async-openai's format
fn build_request(
    model: &str,
    messages: Vec<LlmMessage>,
    tools: Option<Vec<ToolDefinition>>,
    options: Option<ChatOptions>,
) -> Result<CreateChatCompletionRequest> {
    let converted_messages = convert_messages(messages)?;
    let converted_tools = tools.map(convert_tools);

    if let Some(ref tools) = converted_tools {
        tracing::debug!("Chat request with {} tools enabled", tools.len());
    }

    let mut request_builder = CreateChatCompletionRequestArgs::default();
    request_builder.model(model);
    request_builder.messages(converted_messages);

    if let Some(tools) = converted_tools {
        request_builder.tools(tools);
    }

    if let Some(opts) = options {
        if let Some(max_tokens) = opts.max_tokens {
            request_builder.max_tokens(max_tokens);
        }
        if let Some(temperature) = opts.temperature {
            request_builder.temperature(temperature);
        }
        if let Some(top_p) = opts.top_p {
            request_builder.top_p(top_p);
        }
    }

    request_builder.build().map_err(|e| {
        LlmError::InvalidRequest {
            message: format!("Failed to build request: {}", e),
        }
        .into()
    })
}

/// Convert our internal message format to async-openai's format
fn convert_messages(messages: Vec<LlmMessage>) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut converted = Vec::new();

    for message in messages {
        match message.role {
            MessageRole::System => {
                let content = extract_text_content(&message.content);
                converted.push(ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage {
                        content: content.into(),
                        name: None,
                    },
                ));
            }
            MessageRole::User => {
                let content = extract_text_content(&message.content);
                converted.push(ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage {
                        content: content.into(),
                        name: None,
                    },
                ));
            }
            MessageRole::Assistant => match &message.content {
                MessageContent::Text(text) => {
                    converted.push(ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                                text.clone(),
                            )),
                            ..Default::default()
                        },
                    ));
                }
                MessageContent::Blocks(blocks) => {
                    let mut content = String::new();
                    let mut tool_calls = Vec::new();

                    for block in blocks {
                        match block {
                            ContentBlock::Text { text } => {
                                if !content.is_empty() {
                                    content.push('\n');
                                }
                                content.push_str(text);
                            }
                            ContentBlock::ToolUse { id, name, input } => {
                                tool_calls.push(ChatCompletionMessageToolCall {
                                    id: id.clone(),
                                    r#type: ChatCompletionToolType::Function,
                                    function: async_openai::types::FunctionCall {
                                        name: name.clone(),
                                        arguments: input.to_string(),
                                    },
                                });
                            }
                            ContentBlock::ToolResult { .. } => {}
                        }
                    }

                    converted.push(ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: if content.is_empty() {
                                None
                            } else {
                                Some(ChatCompletionRequestAssistantMessageContent::Text(content))
                            },
                            tool_calls: if tool_calls.is_empty() {
                                None
                            } else {
                                Some(tool_calls)
                            },
                            ..Default::default()
                        },
                    ));
                }
            },
            MessageRole::Tool => {
                let mut pushed_any = false;
                if let MessageContent::Blocks(blocks) = &message.content {
                    for block in blocks {
                        if let ContentBlock::ToolResult {
                            tool_use_id,
                            content,
                            ..
                        } = block
                        {
                            converted.push(ChatCompletionRequestMessage::Tool(
                                ChatCompletionRequestToolMessage {
                                    content: ChatCompletionRequestToolMessageContent::Text(
                                        content.clone(),
                                    ),
                                    tool_call_id: tool_use_id.clone(),
                                },
                            ));
                            pushed_any = true;
                        }
                    }
                }
                if !pushed_any {
                    return Err(LlmError::InvalidRequest {
                        message: "Tool message must contain ToolResult".to_string(),
                    }
                    .into());
                }
            }
        }
    }

    Ok(converted)
}

/// Extract text content from MessageContent
fn extract_text_content(content: &MessageContent) -> String {
    match content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Blocks(blocks) => {
            let text_parts: Vec<&str> = blocks
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect();
            text_parts.join("\n")
        }
    }
}

/// Convert our tool definitions to async-openai's format
fn convert_tools(tools: Vec<ToolDefinition>) -> Vec<ChatCompletionTool> {
    tools
        .into_iter()
        .map(|tool| ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: tool.function.name,
                description: Some(tool.function.description),
                parameters: Some(tool.function.parameters),
                strict: None,
            },
        })
        .collect()
}

/// Convert an async-openai response to our internal format
fn convert_response(
    response: async_openai::types::CreateChatCompletionResponse,
) -> Result<LlmResponse> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidRequest {
            message: "No choices in response".to_string(),
        })?;

    let tool_call_blocks = |tool_calls: Vec<ChatCompletionMessageToolCall>| {
        tool_calls
            .into_iter()
            .map(|tool_call| {
                let function = tool_call.function;
                let args: Value = serde_json::from_str(&function.arguments)
                    .unwrap_or_else(|_| Value::String(function.arguments.clone()));

                ContentBlock::ToolUse {
                    id: tool_call.id,
                    name: function.name,
                    input: args,
                }
            })
            .collect::<Vec<_>>()
    };

    let message_content = match (choice.message.content, choice.message.tool_calls) {
        (Some(content), Some(tool_calls)) => {
            let mut blocks = vec![ContentBlock::Text { text: content }];
            blocks.extend(tool_call_blocks(tool_calls));
            MessageContent::Blocks(blocks)
        }
        (Some(content), None) => MessageContent::Text(content),
        (None, Some(tool_calls)) => MessageContent::Blocks(tool_call_blocks(tool_calls)),
        (None, None) => MessageContent::Text(String::new()),
    };

    let message = LlmMessage {
        role: MessageRole::Assistant,
        content: message_content,
    };

    let usage = response.usage.map(|u| Usage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    let finish_reason = choice.finish_reason.map(|reason| match reason {
        async_openai::types::FinishReason::Stop => FinishReason::Stop,
        async_openai::types::FinishReason::Length => FinishReason::Length,
        async_openai::types::FinishReason::ToolCalls => FinishReason::ToolCalls,
        async_openai::types::FinishReason::ContentFilter => FinishReason::ContentFilter,
        async_openai::types::FinishReason::FunctionCall => FinishReason::ToolCalls,
    });

    Ok(LlmResponse {
        message,
        usage,
        model: response.model,
        finish_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Protocol;
    use crate::llm::message::LlmMessage;
    use serde_json::json;

    fn azure_config() -> ResolvedLlmConfig {
        ResolvedLlmConfig::new(
            Protocol::AzureOpenAI,
            "https://example.openai.azure.com".to_string(),
            "test-key".to_string(),
            "gpt-4o".to_string(),
        )
        .with_api_version("2024-10-21".to_string())
    }

    #[test]
    fn azure_client_requires_api_version() {
        let mut config = azure_config();
        config.api_version = None;

        let error = AzureOpenAiClient::new(&config).unwrap_err();
        assert!(error.to_string().contains("api_version"));
    }

    #[test]
    fn azure_client_requires_api_key() {
        let mut config = azure_config();
        config.api_key = String::new();

        assert!(AzureOpenAiClient::new(&config).is_err());
    }

    #[test]
    fn request_carries_messages_and_tools() {
        let messages = vec![
            LlmMessage::system("You are an employee information agent."),
            LlmMessage::user("who is the supervisor of the employee named David?"),
        ];
        let tools = vec![ToolDefinition {
            tool_type: "function".to_string(),
            function: crate::llm::FunctionDefinition {
                name: "get_employee_supervisor".to_string(),
                description: "Returns the supervisor for a given employee ID.".to_string(),
                parameters: json!({"type": "object", "properties": {}}),
            },
        }];

        let request =
            build_request("gpt-4o", messages, Some(tools), Some(ChatOptions::default())).unwrap();

        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.tools.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn tool_message_without_result_block_is_rejected() {
        let message = LlmMessage {
            role: MessageRole::Tool,
            content: MessageContent::Text("orphan".to_string()),
        };

        assert!(convert_messages(vec![message]).is_err());
    }
}
