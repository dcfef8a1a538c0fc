//! Tool-calling runner.
//!
//! Hands an agent's instruction and tool definitions to the model and executes
//! whichever tools it asks for until it produces a final answer.

mod runner;

pub use runner::{dispatch, Agent, AgentResponse, ToolCallRecord};
