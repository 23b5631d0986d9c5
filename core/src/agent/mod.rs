//! Agent core logic and execution engine

pub mod base;
pub mod config;
pub mod core;
pub mod prompt;
pub mod run;

pub use base::{Agent, AgentResult};
pub use config::{AgentBuilder, AgentConfig, AgentProfile};
pub use core::AgentCore;
pub use run::AgentRun;
