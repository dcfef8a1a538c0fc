//! CLI module for Ushauri.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Ushauri - logistics compliance and community advisory agents
///
/// Each agent exposes a fixed set of tools that turn structured requests into
/// model prompts and return a uniform success/error envelope.
#[derive(Parser, Debug)]
#[command(name = "ushauri")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the Smart Community HTTP endpoint
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Invoke one tool directly and print its envelope
    Call {
        /// Agent owning the tool (logistics, community)
        agent: String,

        /// Tool name, e.g. check_compliance
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// List an agent's tools
    Tools {
        /// Agent to describe (logistics, community)
        agent: String,

        /// Also print the agent's instruction block
        #[arg(long)]
        instructions: bool,

        /// Print OpenAI-style function definitions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let the model choose tools to complete a task
    Agent {
        /// Agent to run (logistics, community)
        agent: String,

        /// The task, e.g. "Explain the Traffic Act for matatu drivers in Swahili"
        task: String,

        /// Model to use (defaults to model.name)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}
