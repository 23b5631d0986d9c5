//! Declarative task definitions
//!
//! A task pairs an objective with the tools permitted to satisfy it and a
//! statement of the expected outcome. Tasks carry no execution logic; they
//! are rendered into the system prompt so the model can plan its tool calls.

use crate::error::{AgentError, Result};
use crate::tools::ToolExecutor;
use serde::{Deserialize, Serialize};

/// A declarative task description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Task name
    pub name: String,

    /// What the task accomplishes
    pub description: String,

    /// Names of the tools the task is allowed to use
    pub tools: Vec<String>,

    /// Statement of the expected outcome
    pub expected_output: String,
}

impl TaskDefinition {
    /// Create a new task definition
    pub fn new<S: Into<String>>(
        name: S,
        description: S,
        tools: Vec<String>,
        expected_output: S,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tools,
            expected_output: expected_output.into(),
        }
    }

    /// Render the task as a prompt fragment
    pub fn render(&self) -> String {
        format!(
            "- {}: {} (tools: {}; expected outcome: {})",
            self.name,
            self.description,
            self.tools.join(", "),
            self.expected_output
        )
    }
}

/// The builtin employee-directory task list.
///
/// Supervisor lookups are keyed by employee ID throughout, so answering a
/// supervisor question for a name means resolving the name to an ID first.
pub fn directory_tasks() -> Vec<TaskDefinition> {
    vec![
        TaskDefinition::new(
            "get_employee_id_and_supervisor",
            "Find the employee ID for a given employee name, then the supervisor for that ID.",
            vec![
                "get_employee_id".to_string(),
                "get_employee_supervisor".to_string(),
            ],
            "The employee ID and supervisor have been reported.",
        ),
        TaskDefinition::new(
            "get_employee_location",
            "Find the location of an employee from the employee name.",
            vec!["get_employee_location".to_string()],
            "The location of the employee has been reported.",
        ),
        TaskDefinition::new(
            "get_employee_skill_set",
            "Find the primary skill of an employee from the employee ID.",
            vec!["get_employee_skill_set".to_string()],
            "The primary skill of the employee has been reported.",
        ),
    ]
}

/// Check that every tool a task names is registered with the executor
pub fn validate_tasks(tasks: &[TaskDefinition], executor: &ToolExecutor) -> Result<()> {
    for task in tasks {
        for tool in &task.tools {
            if executor.get_tool(tool).is_none() {
                return Err(AgentError::InvalidTask {
                    message: format!("task '{}' references unknown tool '{}'", task.name, tool),
                }
                .into());
            }
        }
    }

    Ok(())
}
