//! Configuration module for Ushauri.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{CommunityPrompts, LogisticsPrompts, Prompts};
pub use settings::{GeneralSettings, ModelSettings, PromptSettings, ServerSettings, Settings};
