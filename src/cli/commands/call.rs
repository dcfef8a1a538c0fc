//! Call command - invoke a single tool directly.

use super::build_context;
use crate::agents::{AgentDescriptor, AgentKind};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::{Context, Result};
use serde_json::Value;

/// Run the call command.
pub async fn run_call(agent: &str, tool: &str, args: &str, settings: Settings) -> Result<()> {
    let kind: AgentKind = agent.parse()?;
    let args: Value = serde_json::from_str(args).context("--args must be a JSON object")?;

    let context = build_context(&settings)?;
    let descriptor = AgentDescriptor::new(kind, &settings.model.name, &context.prompts);

    // Unknown names are reported before any spinner or network activity.
    descriptor.tool(tool)?;

    let spinner = Output::spinner(&format!("Calling {}...", tool));
    let result = descriptor.call(tool, args, &context).await;
    spinner.finish_and_clear();

    Output::envelope(&result);
    Ok(())
}
