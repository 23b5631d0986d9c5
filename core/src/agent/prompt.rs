//! Prompt assembly for the agent

use super::config::AgentProfile;
use crate::task::TaskDefinition;

/// Build the system prompt from the agent profile, task list and tool names
pub fn build_system_prompt(
    profile: &AgentProfile,
    tasks: &[TaskDefinition],
    tool_names: &[&str],
) -> String {
    let mut prompt = format!(
        "You are {role}. {backstory}\n\nYour goal: {goal}",
        role = profile.role,
        backstory = profile.backstory,
        goal = profile.goal,
    );

    if !tasks.is_empty() {
        let rendered: Vec<String> = tasks.iter().map(TaskDefinition::render).collect();
        prompt.push_str(&format!(
            "\n\nYou can carry out the following tasks:\n{}",
            rendered.join("\n")
        ));
    }

    prompt.push_str(
        "\n\nUse the tools to look up employee information; never invent values. \
         When you have gathered everything the query needs, reply with the final \
         answer as plain text and make no further tool calls.",
    );

    prompt.push_str(&format!("\n\nAvailable tools: {}", tool_names.join(", ")));

    prompt
}

/// Build the user message for a query
pub fn build_user_message(query: &str) -> String {
    format!("User query: {}", query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::directory_tasks;

    #[test]
    fn system_prompt_mentions_profile_tasks_and_tools() {
        let profile = AgentProfile::default();
        let tasks = directory_tasks();
        let tools = ["get_employee_id", "get_employee_supervisor"];

        let prompt = build_system_prompt(&profile, &tasks, &tools);

        assert!(prompt.contains("employee info agent"));
        assert!(prompt.contains("get_employee_id_and_supervisor"));
        assert!(prompt.contains("Available tools: get_employee_id, get_employee_supervisor"));
    }

    #[test]
    fn system_prompt_omits_task_section_when_empty() {
        let prompt = build_system_prompt(&AgentProfile::default(), &[], &["get_employee_id"]);
        assert!(!prompt.contains("following tasks"));
    }

    #[test]
    fn user_message_wraps_query() {
        let message = build_user_message("who is the supervisor of the employee named David?");
        assert!(message.contains("who is the supervisor of the employee named David?"));
    }
}
