//! Tools command - describe an agent's registry.

use super::load_prompts;
use crate::agents::{AgentDescriptor, AgentKind};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the tools command.
pub fn run_tools(agent: &str, instructions: bool, json: bool, settings: Settings) -> Result<()> {
    let kind: AgentKind = agent.parse()?;
    let prompts = load_prompts(&settings)?;
    let descriptor = AgentDescriptor::new(kind, &settings.model.name, &prompts);

    if json {
        let definitions = serde_json::to_string_pretty(&descriptor.tool_definitions())?;
        println!("{}", definitions);
        return Ok(());
    }

    Output::header(descriptor.name);
    println!();
    Output::kv("Agent", &descriptor.kind.to_string());
    Output::kv("Model", &descriptor.model);
    Output::kv("Description", descriptor.description);
    Output::kv("Off-topic reply", descriptor.refusal);
    println!();

    Output::header(&format!("Tools ({})", descriptor.tools.len()));
    for definition in descriptor.tool_definitions() {
        Output::tool(
            &definition.function.name,
            definition.function.description.as_deref().unwrap_or_default(),
        );
    }

    if instructions {
        Output::header("Instructions");
        println!("{}", descriptor.instruction);
    }

    Ok(())
}
