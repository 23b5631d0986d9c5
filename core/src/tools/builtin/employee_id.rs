//! Employee ID lookup tool

use crate::directory::Directory;
use crate::error::Result;
use crate::impl_tool_factory;
use crate::tools::{Tool, ToolCall, ToolExample, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Tool reporting the employee ID for an employee name
pub struct EmployeeIdTool {
    directory: Arc<Directory>,
}

impl EmployeeIdTool {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for EmployeeIdTool {
    fn name(&self) -> &str {
        "get_employee_id"
    }

    fn description(&self) -> &str {
        "Returns the employee ID for a given employee name."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "employee_name": {
                    "type": "string",
                    "description": "The name of the employee."
                }
            },
            "required": ["employee_name"]
        })
    }

    async fn execute(&self, call: ToolCall) -> Result<ToolResult> {
        let employee_name: String = call.get_parameter("employee_name").unwrap_or_default();
        let answer = self.directory.id_of(&employee_name);

        Ok(ToolResult::success(&call.id, &answer))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample {
            description: "Resolve an employee name to an employee ID".to_string(),
            parameters: json!({
                "employee_name": "David"
            }),
            expected_result: "A sentence naming the employee's ID".to_string(),
        }]
    }
}

impl_tool_factory!(
    EmployeeIdToolFactory,
    EmployeeIdTool,
    "get_employee_id",
    "Returns the employee ID for a given employee name."
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::EMPLOYEE_IDS;

    #[test]
    fn reports_an_id_from_the_fixed_set() {
        let tool = EmployeeIdTool::new(Arc::new(Directory::with_seed(3)));
        let call = ToolCall::new("get_employee_id", json!({"employee_name": "David"}));

        let result = tokio_test::block_on(tool.execute(call)).unwrap();
        assert!(result.success);
        assert!(EMPLOYEE_IDS.iter().any(|id| result.content.ends_with(id)));
    }

    #[test]
    fn empty_name_yields_error_sentence() {
        let tool = EmployeeIdTool::new(Arc::new(Directory::with_seed(3)));
        let call = ToolCall::new("get_employee_id", json!({"employee_name": ""}));

        let result = tokio_test::block_on(tool.execute(call)).unwrap();
        assert!(result.content.contains("error"));
        assert!(result.content.contains("Employee name is required."));
    }
}
