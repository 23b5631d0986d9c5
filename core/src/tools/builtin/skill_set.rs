//! Skill set lookup tool

use crate::directory::Directory;
use crate::error::Result;
use crate::impl_tool_factory;
use crate::tools::{Tool, ToolCall, ToolExample, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Tool reporting the primary skill for an employee ID
pub struct SkillSetTool {
    directory: Arc<Directory>,
}

impl SkillSetTool {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Tool for SkillSetTool {
    fn name(&self) -> &str {
        "get_employee_skill_set"
    }

    fn description(&self) -> &str {
        "Returns the skill set of a given employee ID."
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
        let employee_id: String = call.get_parameter("employee_id").unwrap_or_default();
        let answer = self.directory.skills_of(&employee_id);

        Ok(ToolResult::success(&call.id, &answer))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample {
            description: "Look up the primary skill for an employee ID".to_string(),
            parameters: json!({
                "employee_id": "abd104"
            }),
            expected_result: "A sentence naming the employee's primary skill".to_string(),
        }]
    }
}

impl_tool_factory!(
    SkillSetToolFactory,
    SkillSetTool,
    "get_employee_skill_set",
    "Returns the skill set of a given employee ID."
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::SKILLS;

    #[test]
    fn reports_a_skill_from_the_fixed_set() {
        let tool = SkillSetTool::new(Arc::new(Directory::with_seed(4)));
        let call = ToolCall::new("get_employee_skill_set", json!({"employee_id": "abd104"}));

        let result = tokio_test::block_on(tool.execute(call)).unwrap();
        assert!(result.success);
        assert!(result
            .content
            .starts_with("The primary skill for the employee with ID abd104 is "));
        assert!(SKILLS.iter().any(|s| result.content.ends_with(s)));
    }

    #[test]
    fn empty_id_yields_error_sentence() {
        let tool = SkillSetTool::new(Arc::new(Directory::with_seed(4)));
        let call = ToolCall::new("get_employee_skill_set", json!({"employee_id": ""}));

        let result = tokio_test::block_on(tool.execute(call)).unwrap();
        assert!(result.content.contains("error"));
        assert!(result.content.contains("Employee ID is required."));
    }
}
