//! Tools listing command

use anyhow::Result;

use roster_core::tools::ToolRegistry;

/// Show available tools
pub fn tools_command() -> Result<()> {
    println!("Available tools\n");

    let registry = ToolRegistry::default();

    for name in registry.list_tools() {
        if let Some((tool_name, description)) = registry.get_tool_info(name) {
            println!("  {}", tool_name);
            println!("      {}\n", description);
        }
    }

    Ok(())
}
