//! CLI command implementations.

mod agent;
mod call;
mod config;
mod serve;
mod tools;

pub use agent::run_agent;
pub use call::run_call;
pub use config::run_config;
pub use serve::{router, run_serve, AppState};
pub use tools::run_tools;

use crate::config::{Prompts, Settings};
use crate::model::OpenAIGenerator;
use crate::tool::ToolContext;
use std::sync::Arc;

/// Build the shared tool context from settings.
///
/// Errors when the model credential is missing, so commands fail before any work starts.
pub(crate) fn build_context(settings: &Settings) -> anyhow::Result<ToolContext> {
    let generator = OpenAIGenerator::from_settings(&settings.model)?;
    let prompts = load_prompts(settings)?;
    Ok(ToolContext::new(
        Arc::new(generator),
        prompts,
        settings.model.timeout(),
    ))
}

pub(crate) fn load_prompts(settings: &Settings) -> anyhow::Result<Prompts> {
    Ok(Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?)
}
