//! Tool system and built-in directory tool adapters

pub mod base;
pub mod builtin;
pub mod registry;

pub use base::{Tool, ToolCall, ToolExample, ToolExecutor, ToolResult};
pub use registry::{ToolFactory, ToolRegistry};
