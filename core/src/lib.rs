//! # roster-core
//!
//! Core library for Roster - an employee-directory lookup agent.
//!
//! This library provides the building blocks for answering natural-language
//! questions about employees: mock directory lookups, the tool adapters that
//! expose them to a hosted model, declarative task definitions, and the agent
//! loop that ties them together.

// Core modules
pub mod agent;
pub mod config;
pub mod directory;
pub mod error;
pub mod llm;
pub mod task;
pub mod tools;
pub mod transcript;

// Re-export commonly used types
pub use agent::{Agent, AgentBuilder, AgentConfig, AgentProfile, AgentRun};
pub use config::{ModelParams, Protocol, ResolvedLlmConfig};
pub use directory::Directory;
pub use task::{directory_tasks, TaskDefinition};
pub use transcript::TranscriptRecorder;

/// Current version of the roster-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
