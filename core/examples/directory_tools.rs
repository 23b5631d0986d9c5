//! Exercise the directory tools directly, without a model endpoint.
//!
//! ```bash
//! cargo run --example directory_tools
//! ```

use roster_core::tools::{ToolCall, ToolRegistry};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A fixed seed makes every lookup reproducible
    let executor = ToolRegistry::with_seed(7).create_executor_with_all();

    let calls = [
        ToolCall::new("get_employee_id", json!({"employee_name": "David"})),
        ToolCall::new("get_employee_supervisor", json!({"employee_id": "abd104"})),
        ToolCall::new("get_employee_location", json!({"employee_name": "David"})),
        ToolCall::new("get_employee_skill_set", json!({"employee_id": "abd104"})),
    ];

    for call in calls {
        let name = call.name.clone();
        let result = executor.execute(call).await?;
        println!("{name}: {}", result.content);
    }

    Ok(())
}
