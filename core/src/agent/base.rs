//! Base agent trait

use super::config::AgentConfig;
use crate::error::Result;
use crate::transcript::TranscriptRecorder;
use async_trait::async_trait;

use super::run::AgentRun;

/// Result type for agent operations
pub type AgentResult<T> = Result<T>;

/// Base trait for all agents
#[async_trait]
pub trait Agent: Send + Sync {
    /// Execute one run against a natural-language query
    async fn run(&mut self, query: &str) -> AgentResult<AgentRun>;

    /// Get the agent's configuration
    fn config(&self) -> &AgentConfig;

    /// Get the agent's name/type
    fn agent_kind(&self) -> &str;

    /// Set the transcript recorder
    fn set_transcript_recorder(&mut self, recorder: TranscriptRecorder);

    /// Get the transcript recorder
    fn transcript_recorder(&self) -> Option<&TranscriptRecorder>;
}
