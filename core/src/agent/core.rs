//! AgentCore implementation

use super::config::AgentConfig;
use super::prompt::{build_system_prompt, build_user_message};
use super::{Agent, AgentResult, AgentRun};
use crate::config::Protocol;
use crate::error::{AgentError, Result};
use crate::llm::{ChatOptions, ContentBlock, LlmClient, LlmMessage};
use crate::task::{validate_tasks, TaskDefinition};
use crate::tools::{ToolCall, ToolExecutor, ToolRegistry};
use crate::transcript::{TranscriptEntry, TranscriptRecorder};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// The employee-directory agent
pub struct AgentCore {
    config: AgentConfig,
    llm_client: Arc<dyn LlmClient>,
    tool_executor: ToolExecutor,
    tasks: Vec<TaskDefinition>,
    chat_options: ChatOptions,
    transcript: Option<TranscriptRecorder>,
    history: Vec<LlmMessage>,
}

impl AgentCore {
    /// Create a new agent from a resolved LLM configuration
    pub fn new(
        agent_config: AgentConfig,
        llm_config: crate::config::ResolvedLlmConfig,
        registry: ToolRegistry,
        tasks: Vec<TaskDefinition>,
    ) -> Result<Self> {
        let llm_client: Arc<dyn LlmClient> = match llm_config.protocol {
            Protocol::OpenAICompat => Arc::new(crate::llm::OpenAiClient::new(&llm_config)?),
            Protocol::AzureOpenAI => Arc::new(crate::llm::AzureOpenAiClient::new(&llm_config)?),
        };

        let chat_options = ChatOptions::from(&llm_config.params);
        let tool_executor = registry.create_executor(&agent_config.tools);

        Self::assemble(agent_config, llm_client, tool_executor, tasks, chat_options)
    }

    /// Create an agent around an existing LLM client and executor.
    ///
    /// Useful for injecting a custom client implementation.
    pub fn with_client(
        agent_config: AgentConfig,
        llm_client: Arc<dyn LlmClient>,
        tool_executor: ToolExecutor,
        tasks: Vec<TaskDefinition>,
    ) -> Result<Self> {
        Self::assemble(
            agent_config,
            llm_client,
            tool_executor,
            tasks,
            ChatOptions::default(),
        )
    }

    fn assemble(
        config: AgentConfig,
        llm_client: Arc<dyn LlmClient>,
        tool_executor: ToolExecutor,
        tasks: Vec<TaskDefinition>,
        chat_options: ChatOptions,
    ) -> Result<Self> {
        validate_tasks(&tasks, &tool_executor)?;

        Ok(Self {
            config,
            llm_client,
            tool_executor,
            tasks,
            chat_options,
            transcript: None,
            history: Vec::new(),
        })
    }

    /// Get the system prompt for this agent
    fn system_prompt(&self) -> String {
        let tool_names = self.tool_executor.list_tools();

        match &self.config.system_prompt {
            Some(custom) => format!("{}\n\nAvailable tools: {}", custom, tool_names.join(", ")),
            None => build_system_prompt(&self.config.profile, &self.tasks, &tool_names),
        }
    }

    async fn record(&self, entry: TranscriptEntry) -> Result<()> {
        if let Some(recorder) = &self.transcript {
            recorder.record(entry).await?;
        }
        Ok(())
    }

    /// Execute a single step of the agent.
    ///
    /// Returns the final answer once the model replies without tool calls.
    async fn execute_step(&mut self, step: usize) -> Result<Option<String>> {
        let messages = self.history.clone();

        self.record(TranscriptEntry::llm_request(
            messages.len(),
            self.llm_client.model_name().to_string(),
            self.llm_client.provider_name().to_string(),
            step,
        ))
        .await?;

        let tool_definitions = self.tool_executor.tool_definitions();

        tracing::debug!("Requesting chat completion for step {}", step);
        let response = match self
            .llm_client
            .chat_completion(messages, Some(tool_definitions), Some(self.chat_options.clone()))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("LLM request failed for step {}: {}", step, e);
                return Err(e);
            }
        };

        self.record(TranscriptEntry::llm_response(
            response.message.clone(),
            response.usage.clone(),
            response.finish_reason.as_ref().map(|r| format!("{:?}", r)),
            step,
        ))
        .await?;

        self.history.push(response.message.clone());

        if !response.message.has_tool_use() {
            // A reply without tool calls is the final answer
            return Ok(Some(response.message.get_text().unwrap_or_default()));
        }

        for tool_use in response.message.get_tool_uses() {
            if let ContentBlock::ToolUse { id, name, input } = tool_use {
                let tool_call = ToolCall {
                    id: id.clone(),
                    name: name.clone(),
                    parameters: input.clone(),
                };

                tracing::info!("Executing tool: {}", name);
                self.record(TranscriptEntry::tool_invocation(tool_call.clone(), step))
                    .await?;

                let tool_result = self.tool_executor.execute(tool_call).await?;

                self.record(TranscriptEntry::tool_outcome(tool_result.clone(), step))
                    .await?;

                self.history.push(LlmMessage::tool_result(
                    id.clone(),
                    !tool_result.success,
                    tool_result.content,
                ));
            }
        }

        // Tool results are appended; the next step lets the model read them
        Ok(None)
    }
}

#[async_trait]
impl Agent for AgentCore {
    async fn run(&mut self, query: &str) -> AgentResult<AgentRun> {
        let start_time = Instant::now();

        self.history.clear();

        self.record(TranscriptEntry::run_start(
            query.to_string(),
            serde_json::to_value(&self.config).unwrap_or_default(),
        ))
        .await?;

        self.history.push(LlmMessage::system(self.system_prompt()));
        self.history.push(LlmMessage::user(build_user_message(query)));

        let mut step = 0;
        let mut final_answer: Option<String> = None;

        while step < self.config.max_steps && final_answer.is_none() {
            step += 1;

            match self.execute_step(step).await {
                Ok(answer) => final_answer = answer,
                Err(e) => {
                    self.record(TranscriptEntry::fault(
                        e.to_string(),
                        Some(format!("Step {}", step)),
                        step,
                    ))
                    .await?;

                    let duration_ms = start_time.elapsed().as_millis() as u64;
                    return Ok(AgentRun::failure(
                        format!("Error in step {}: {}", step, e),
                        step,
                        duration_ms,
                    ));
                }
            }
        }

        let duration_ms = start_time.elapsed().as_millis() as u64;

        match final_answer {
            Some(answer) => {
                self.record(TranscriptEntry::run_complete(
                    true,
                    answer.clone(),
                    step,
                    duration_ms,
                ))
                .await?;

                Ok(AgentRun::success(answer, step, duration_ms))
            }
            None => {
                let error = AgentError::MaxStepsExceeded {
                    max_steps: self.config.max_steps,
                };

                self.record(TranscriptEntry::run_complete(
                    false,
                    error.to_string(),
                    step,
                    duration_ms,
                ))
                .await?;

                Ok(AgentRun::failure(error.to_string(), step, duration_ms))
            }
        }
    }

    fn config(&self) -> &AgentConfig {
        &self.config
    }

    fn agent_kind(&self) -> &str {
        "roster_agent"
    }

    fn set_transcript_recorder(&mut self, recorder: TranscriptRecorder) {
        self.transcript = Some(recorder);
    }

    fn transcript_recorder(&self) -> Option<&TranscriptRecorder> {
        self.transcript.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::llm::{
        ChatOptions, FinishReason, LlmClient, LlmMessage, LlmResponse, MessageContent, MessageRole,
        ToolDefinition,
    };
    use crate::task::directory_tasks;
    use crate::transcript::EntryKind;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // Mock LLM client that replays a scripted sequence of messages
    struct ScriptedLlmClient {
        script: Mutex<VecDeque<LlmMessage>>,
    }

    impl ScriptedLlmClient {
        fn new(script: Vec<LlmMessage>) -> Self {
            Self {
                script: Mutex::new(script.into()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlmClient {
        async fn chat_completion(
            &self,
            _messages: Vec<LlmMessage>,
            _tools: Option<Vec<ToolDefinition>>,
            _options: Option<ChatOptions>,
        ) -> Result<LlmResponse> {
            let message = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| LlmMessage::assistant("script exhausted"));

            let finish_reason = if message.has_tool_use() {
                FinishReason::ToolCalls
            } else {
                FinishReason::Stop
            };

            Ok(LlmResponse {
                message,
                usage: None,
                model: "mock-model".to_string(),
                finish_reason: Some(finish_reason),
            })
        }

        fn model_name(&self) -> &str {
            "mock-model"
        }

        fn provider_name(&self) -> &str {
            "mock"
        }
    }

    fn tool_use_message(name: &str, input: serde_json::Value) -> LlmMessage {
        LlmMessage {
            role: MessageRole::Assistant,
            content: MessageContent::Blocks(vec![ContentBlock::ToolUse {
                id: "call_1".to_string(),
                name: name.to_string(),
                input,
            }]),
        }
    }

    fn scripted_agent(script: Vec<LlmMessage>, max_steps: usize) -> AgentCore {
        let mut config = AgentConfig::default();
        config.max_steps = max_steps;

        let executor = ToolRegistry::with_seed(42).create_executor_with_all();

        AgentCore::with_client(
            config,
            Arc::new(ScriptedLlmClient::new(script)),
            executor,
            directory_tasks(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn text_response_ends_the_run() {
        let mut agent = scripted_agent(
            vec![LlmMessage::assistant(
                "The supervisor for the given employee is Jessica",
            )],
            10,
        );

        let run = agent.run("who is the supervisor of employee abd104?").await.unwrap();

        assert!(run.success);
        assert_eq!(run.steps_executed, 1);
        assert_eq!(
            run.final_answer,
            "The supervisor for the given employee is Jessica"
        );
    }

    #[tokio::test]
    async fn tool_call_is_dispatched_before_the_final_answer() {
        let mut agent = scripted_agent(
            vec![
                tool_use_message("get_employee_location", json!({"employee_name": "David"})),
                LlmMessage::assistant("David is based in one of our offices."),
            ],
            10,
        );
        agent.set_transcript_recorder(TranscriptRecorder::new());

        let run = agent.run("where is David located?").await.unwrap();

        assert!(run.success);
        assert_eq!(run.steps_executed, 2);

        let entries = agent.transcript_recorder().unwrap().entries().await;
        let outcome = entries
            .iter()
            .find_map(|entry| match &entry.kind {
                EntryKind::ToolOutcome { result } => Some(result.clone()),
                _ => None,
            })
            .expect("no tool outcome recorded");

        assert!(outcome.success);
        assert!(outcome.content.starts_with("The location for David is "));
    }

    #[tokio::test]
    async fn unknown_tool_from_model_is_fed_back_as_error_result() {
        let mut agent = scripted_agent(
            vec![
                tool_use_message("get_employee_salary", json!({"employee_name": "David"})),
                LlmMessage::assistant("I cannot look up salaries."),
            ],
            10,
        );
        agent.set_transcript_recorder(TranscriptRecorder::new());

        let run = agent.run("what is David's salary?").await.unwrap();

        assert!(run.success);
        assert_eq!(run.steps_executed, 2);

        let entries = agent.transcript_recorder().unwrap().entries().await;
        let outcome = entries
            .iter()
            .find_map(|entry| match &entry.kind {
                EntryKind::ToolOutcome { result } => Some(result.clone()),
                _ => None,
            })
            .expect("no tool outcome recorded");

        assert!(!outcome.success);
        assert!(outcome.content.contains("Tool not found"));
    }

    #[tokio::test]
    async fn run_fails_when_max_steps_are_exhausted() {
        let script = (0..3)
            .map(|_| tool_use_message("get_employee_id", json!({"employee_name": "David"})))
            .collect();
        let mut agent = scripted_agent(script, 2);

        let run = agent.run("what is David's employee ID?").await.unwrap();

        assert!(!run.success);
        assert_eq!(run.steps_executed, 2);
        assert!(run.final_answer.contains("Maximum steps exceeded"));
    }

    #[test]
    fn custom_system_prompt_replaces_the_assembled_one() {
        let agent = scripted_agent(vec![], 1);
        let assembled = agent.system_prompt();
        assert!(assembled.contains("employee info agent"));
        assert!(assembled.contains("get_employee_id_and_supervisor"));

        let mut config = AgentConfig::default();
        config.system_prompt = Some("You answer directory questions.".to_string());
        let executor = ToolRegistry::with_seed(42).create_executor_with_all();
        let agent = AgentCore::with_client(
            config,
            Arc::new(ScriptedLlmClient::new(vec![])),
            executor,
            directory_tasks(),
        )
        .unwrap();

        let prompt = agent.system_prompt();
        assert!(prompt.starts_with("You answer directory questions."));
        assert!(prompt.contains("Available tools: get_employee_id,"));
        assert!(!prompt.contains("following tasks"));
    }
}
