//! Transcript entry structures

use crate::llm::LlmMessage;
use crate::tools::{ToolCall, ToolResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the run transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Unique identifier for this entry
    pub id: String,

    /// Timestamp when this entry was created
    pub timestamp: DateTime<Utc>,

    /// Type of entry
    pub kind: EntryKind,

    /// Step number in the run
    pub step: usize,
}

/// Type of transcript entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    /// Run started
    RunStart {
        query: String,
        agent_config: serde_json::Value,
    },

    /// LLM request sent
    LlmRequest {
        message_count: usize,
        model: String,
        provider: String,
    },

    /// LLM response received
    LlmResponse {
        message: LlmMessage,
        usage: Option<crate::llm::Usage>,
        finish_reason: Option<String>,
    },

    /// Tool call dispatched
    ToolInvocation { call: ToolCall },

    /// Tool result received
    ToolOutcome { result: ToolResult },

    /// Run finished
    RunComplete {
        success: bool,
        final_answer: String,
        total_steps: usize,
        duration_ms: u64,
    },

    /// Error occurred
    Fault {
        error: String,
        context: Option<String>,
    },
}

impl TranscriptEntry {
    /// Create a new transcript entry
    pub fn new(kind: EntryKind, step: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            kind,
            step,
        }
    }

    /// Create a run start entry
    pub fn run_start(query: String, agent_config: serde_json::Value) -> Self {
        Self::new(EntryKind::RunStart { query, agent_config }, 0)
    }

    /// Create an LLM request entry
    pub fn llm_request(message_count: usize, model: String, provider: String, step: usize) -> Self {
        Self::new(
            EntryKind::LlmRequest {
                message_count,
                model,
                provider,
            },
            step,
        )
    }

    /// Create an LLM response entry
    pub fn llm_response(
        message: LlmMessage,
        usage: Option<crate::llm::Usage>,
        finish_reason: Option<String>,
        step: usize,
    ) -> Self {
        Self::new(
            EntryKind::LlmResponse {
                message,
                usage,
                finish_reason,
            },
            step,
        )
    }

    /// Create a tool invocation entry
    pub fn tool_invocation(call: ToolCall, step: usize) -> Self {
        Self::new(EntryKind::ToolInvocation { call }, step)
    }

    /// Create a tool outcome entry
    pub fn tool_outcome(result: ToolResult, step: usize) -> Self {
        Self::new(EntryKind::ToolOutcome { result }, step)
    }

    /// Create a run complete entry
    pub fn run_complete(
        success: bool,
        final_answer: String,
        total_steps: usize,
        duration_ms: u64,
    ) -> Self {
        Self::new(
            EntryKind::RunComplete {
                success,
                final_answer,
                total_steps,
                duration_ms,
            },
            total_steps,
        )
    }

    /// Create a fault entry
    pub fn fault(error: String, context: Option<String>, step: usize) -> Self {
        Self::new(EntryKind::Fault { error, context }, step)
    }
}
