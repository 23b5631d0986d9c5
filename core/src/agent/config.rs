//! Agent configuration structures

use crate::task::{directory_tasks, TaskDefinition};
use crate::tools::ToolRegistry;
use serde::{Deserialize, Serialize};

/// Identity strings the agent presents to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Role the agent plays
    pub role: String,

    /// What the agent is trying to achieve
    pub goal: String,

    /// Background framing for the role
    pub backstory: String,
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            role: "employee info agent".to_string(),
            goal: "give the exact information about the employee based on the user query"
                .to_string(),
            backstory: "You are an employee information agent. Your task is to provide accurate \
                        and relevant information about employees."
                .to_string(),
        }
    }
}

/// Configuration for an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum number of execution steps
    pub max_steps: usize,

    /// List of tools available to this agent
    pub tools: Vec<String>,

    /// Agent identity presented to the model
    #[serde(default)]
    pub profile: AgentProfile,

    /// Custom system prompt for the agent (optional)
    /// If not provided, the prompt is assembled from the profile and tasks
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: 10,
            tools: vec![
                "get_employee_supervisor".to_string(),
                "get_employee_location".to_string(),
                "get_employee_id".to_string(),
                "get_employee_skill_set".to_string(),
            ],
            profile: AgentProfile::default(),
            system_prompt: None,
        }
    }
}

/// Builder for creating agents with resolved LLM configuration
pub struct AgentBuilder {
    llm_config: crate::config::ResolvedLlmConfig,
    agent_config: AgentConfig,
    registry: Option<ToolRegistry>,
    tasks: Vec<TaskDefinition>,
}

impl AgentBuilder {
    /// Create a new agent builder with LLM configuration
    pub fn new(llm_config: crate::config::ResolvedLlmConfig) -> Self {
        Self {
            llm_config,
            agent_config: AgentConfig::default(),
            registry: None,
            tasks: directory_tasks(),
        }
    }

    /// Set agent configuration
    pub fn with_agent_config(mut self, agent_config: AgentConfig) -> Self {
        self.agent_config = agent_config;
        self
    }

    /// Set maximum steps
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.agent_config.max_steps = max_steps;
        self
    }

    /// Set tools
    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.agent_config.tools = tools;
        self
    }

    /// Use a custom tool registry (e.g. one with a seeded directory)
    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the task list
    pub fn with_tasks(mut self, tasks: Vec<TaskDefinition>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Set a custom system prompt
    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.agent_config.system_prompt = system_prompt;
        self
    }

    /// Build the agent
    pub fn build(self) -> crate::error::Result<super::AgentCore> {
        super::AgentCore::new(
            self.agent_config,
            self.llm_config,
            self.registry.unwrap_or_default(),
            self.tasks,
        )
    }
}
