//! Supervisor lookup tool

use crate::directory::Directory;
use crate::error::Result;
use crate::impl_tool_factory;
use crate::tools::{Tool, ToolCall, ToolExample, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Tool reporting the supervisor for an employee ID
pub struct SupervisorTool {
    directory: Arc<Directory>,
}

impl SupervisorTool {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for SupervisorTool {
    fn name(&self) -> &str {
        "get_employee_supervisor"
    }

    fn description(&self) -> &str {
        "Returns the supervisor for a given employee ID."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "employee_id": {
                    "type": "string",
                    "description": "The ID of the employee."
                }
            },
            "required": ["employee_id"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        // A missing argument flows through the directory's sentinel string,
        // not the tool error channel.
        let employee_id: String = call.get_parameter("employee_id").unwrap_or_default();
        let answer = self.directory.supervisor_of(&employee_id);

        Ok(ToolResult::success(&call.id, &answer))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample {
            description: "Look up the supervisor for an employee ID".to_string(),
            parameters: json!({
                "employee_id": "abd104"
            }),
            expected_result: "A sentence naming the supervisor for the employee".to_string(),
        }]
    }
}

impl_tool_factory!(
    SupervisorToolFactory,
    SupervisorTool,
    "get_employee_supervisor",
    "Returns the supervisor for a given employee ID."
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::SUPERVISORS;

    #[test]
    fn reports_a_supervisor_from_the_fixed_set() {
        let tool = SupervisorTool::new(Arc::new(Directory::with_seed(1)));
        let call = ToolCall::new("get_employee_supervisor", json!({"employee_id": "abd104"}));

        let result = tokio_test::block_on(tool.execute(call)).unwrap();
        assert!(result.success);
        assert!(SUPERVISORS.iter().any(|s| result.content.contains(s)));
    }

    #[test]
    fn empty_or_missing_id_yields_error_sentence() {
        let tool = SupervisorTool::new(Arc::new(Directory::with_seed(1)));

        for parameters in [json!({"employee_id": ""}), json!({})] {
            let call = ToolCall::new("get_employee_supervisor", parameters);
            let result = tokio_test::block_on(tool.execute(call)).unwrap();

            // Delivered as an ordinary result string, same channel as success
            assert!(result.success);
            assert!(result.content.contains("error"));
            assert!(result.content.contains("Employee ID is required."));
        }
    }
}
