//! Single query execution command

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use tracing::{debug, info};

use roster_core::agent::Agent;
use roster_core::tools::ToolRegistry;
use roster_core::{AgentBuilder, AgentConfig, TranscriptRecorder};

/// Execute a single query against the directory agent
pub async fn run_command(
    query: String,
    config_loader: crate::config::ConfigLoader,
    max_steps: Option<usize>,
    seed: Option<u64>,
    transcript_file: Option<PathBuf>,
) -> Result<()> {
    info!("Running query: {}", query);

    // Load LLM configuration
    let llm_config = config_loader.load().await?;
    info!("Using protocol: {}", llm_config.protocol.as_str());
    info!("Using model: {}", llm_config.model);

    // Create agent configuration
    let mut agent_config = AgentConfig::default();
    if let Some(steps) = max_steps {
        agent_config.max_steps = steps;
    }

    let registry = match seed {
        Some(seed) => {
            debug!("Directory seeded with {}", seed);
            ToolRegistry::with_seed(seed)
        }
        None => ToolRegistry::default(),
    };

    let mut agent = AgentBuilder::new(llm_config)
        .with_agent_config(agent_config)
        .with_registry(registry)
        .build()?;

    if let Some(path) = &transcript_file {
        info!("Transcript file: {}", path.display());
        agent.set_transcript_recorder(TranscriptRecorder::with_file(path));
    }

    let run = agent.run(&query).await?;

    debug!(
        "Run finished in {} ms over {} steps",
        run.duration_ms, run.steps_executed
    );

    if !run.success {
        return Err(anyhow!(run.final_answer));
    }

    println!("{}", run.final_answer);

    Ok(())
}
