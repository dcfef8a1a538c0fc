//! Ushauri - LLM-backed advisory agents
//!
//! "Ushauri" is Swahili for "advice."
//!
//! # Overview
//!
//! Two agents share one architecture:
//! - **Logistics Legal & Compliance**: explains laws, generates shipping
//!   documents, checks shipment compliance, and advises stakeholders in Kenya
//!   and the EAC.
//! - **Smart Community**: turns residents' descriptions into recommendations,
//!   assesses needs, and drafts project proposals. One of its tools is served
//!   over HTTP.
//!
//! Every tool follows the same contract: validate the request, render a
//! prompt, make exactly one remote model call, normalize the reply (decoded
//! JSON or the raw text under a fallback key), and return a
//! [`ToolResult`](envelope::ToolResult) envelope. Tools never fail
//! abnormally.
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `model` - Remote text generation (`TextGenerator`)
//! - `normalize` - Best-effort JSON decoding with raw-text fallback
//! - `envelope` - The success/error result envelope
//! - `validate` - Precondition checks shared by tools
//! - `tool` - The `Tool` trait and the generic `invoke` routine
//! - `agents` - Agent descriptors, guardrail instructions, and tool registries
//! - `agent` - Optional tool-calling runner
//! - `cli` - Command line interface and HTTP endpoint
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ushauri::agents::logistics::{CheckCompliance, CheckComplianceArgs};
//! use ushauri::config::{Prompts, Settings};
//! use ushauri::model::OpenAIGenerator;
//! use ushauri::tool::{invoke, ToolContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let generator = OpenAIGenerator::from_settings(&settings.model)?;
//!     let ctx = ToolContext::new(Arc::new(generator), Prompts::default(), settings.model.timeout());
//!
//!     let args: CheckComplianceArgs = serde_json::from_value(serde_json::json!({
//!         "shipment_data": {
//!             "shipper": "Acme Ltd", "consignee": "Kampala Traders", "goods": "LED TVs",
//!             "origin": "Mombasa", "destination": "Kampala", "transport_mode": "road"
//!         },
//!         "route": "Northern Corridor",
//!         "cargo_type": "electronics"
//!     }))?;
//!
//!     let result = invoke(&CheckCompliance, &args, &ctx).await;
//!     println!("{}", result.to_json());
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod agents;
pub mod cli;
pub mod config;
pub mod envelope;
pub mod error;
pub mod model;
pub mod normalize;
pub mod openai;
pub mod tool;
pub mod validate;

pub use envelope::ToolResult;
pub use error::{Result, UshauriError};
