//! Agent command implementation.

use super::build_context;
use crate::agent::Agent;
use crate::agents::{AgentDescriptor, AgentKind};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;
use std::sync::Arc;

/// Run the agent command.
pub async fn run_agent(
    agent: &str,
    task: &str,
    model: Option<String>,
    settings: Settings,
) -> Result<()> {
    let kind: AgentKind = agent.parse()?;
    let model = model.unwrap_or_else(|| settings.model.name.clone());

    let context = build_context(&settings)?;
    let descriptor = Arc::new(AgentDescriptor::new(kind, &model, &context.prompts));
    let runner = Agent::new(descriptor, context, &settings.model)?;

    let spinner = Output::spinner("Agent working...");

    match runner.run(task).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.content);

            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    Output::info(&format!("  {}", truncate(&call.to_string(), 80)));
                }
                println!();
            }

            Output::info(&format!(
                "Completed in {} iteration(s)",
                response.iterations
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("check_compliance({...})", 10), "check_c...");
        assert_eq!(truncate("Ushauri wa sheria", 8), "Ushau...");
    }
}
