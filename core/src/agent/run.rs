//! Agent run result structures

use serde::{Deserialize, Serialize};

/// Result of a single agent run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRun {
    /// Whether the run produced a final answer
    pub success: bool,

    /// Final answer text, or a failure description
    pub final_answer: String,

    /// Number of steps executed
    pub steps_executed: usize,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

impl AgentRun {
    /// Create a successful run result
    pub fn success(final_answer: String, steps_executed: usize, duration_ms: u64) -> Self {
        Self {
            success: true,
            final_answer,
            steps_executed,
            duration_ms,
        }
    }

    /// Create a failed run result
    pub fn failure(error: String, steps_executed: usize, duration_ms: u64) -> Self {
        Self {
            success: false,
            final_answer: format!("Run failed: {}", error),
            steps_executed,
            duration_ms,
        }
    }
}
