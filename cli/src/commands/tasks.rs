//! Task listing command

use anyhow::Result;

use roster_core::directory_tasks;

/// Show the builtin task definitions
pub fn tasks_command() -> Result<()> {
    println!("Builtin tasks\n");

    for task in directory_tasks() {
        println!("  {}", task.name);
        println!("      {}", task.description);
        println!("      tools: {}", task.tools.join(", "));
        println!("      expected outcome: {}\n", task.expected_output);
    }

    Ok(())
}
