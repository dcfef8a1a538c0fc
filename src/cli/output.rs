//! CLI output formatting utilities.

use crate::envelope::ToolResult;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a tool name with its description.
    pub fn tool(name: &str, description: &str) {
        println!("  {} {}", style("*").cyan(), style(name).bold());
        println!("    {}", style(description).dim());
    }

    /// Print a status line followed by the envelope as pretty JSON.
    pub fn envelope(result: &ToolResult) {
        match result {
            ToolResult::Success { .. } => Output::success("status: success"),
            ToolResult::Error { message } => Output::warning(&format!("status: error ({})", message)),
        }
        let pretty = serde_json::to_string_pretty(&result.to_json())
            .unwrap_or_else(|_| result.to_json().to_string());
        println!("{}", pretty);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
