//! Configuration types for roster-core
//!
//! Core only accepts a fully resolved, validated configuration object.
//! All discovery, loading, and merging happens in the CLI layer.

pub mod types;

pub use types::{ModelParams, Protocol, ResolvedLlmConfig};
