//! Location lookup tool

use crate::directory::Directory;
use crate::error::Result;
use crate::impl_tool_factory;
use crate::tools::{Tool, ToolCall, ToolExample, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Tool reporting the location of an employee
pub struct LocationTool {
    directory: Arc<Directory>,
}

impl LocationTool {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for LocationTool {
    fn name(&self) -> &str {
        "get_employee_location"
    }

    fn description(&self) -> &str {
        "Returns the location of a given employee."
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
        let answer = self.directory.location_of(&employee_name);

        Ok(ToolResult::success(&call.id, &answer))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample {
            description: "Look up where an employee is based".to_string(),
            parameters: json!({
                "employee_name": "David"
            }),
            expected_result: "A sentence naming the employee's location".to_string(),
        }]
    }
}

impl_tool_factory!(
    LocationToolFactory,
    LocationTool,
    "get_employee_location",
    "Returns the location of a given employee."
);
