//! Output formatting for blobup (text, json)

use std::time::Duration;

use blobup_core::{DisplaySink, DisplayStatus, Outcome};
use clap::ValueEnum;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print an info message (unless in quiet mode)
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print a value as pretty JSON
    pub fn print_json<T: Serialize>(&self, data: &T) {
        println!(
            "{}",
            serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
        );
    }

    /// Print key-value pairs
    pub fn print_kv(&self, pairs: &[(&str, String)]) {
        match self.format {
            OutputFormat::Text => {
                for (key, value) in pairs {
                    println!("{}: {}", key.bold(), value);
                }
            }
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                    .collect();
                self.print_json(&map);
            }
        }
    }
}

/// Display sink that renders outcomes on the terminal
///
/// The uploading state is a spinner on text output; terminal states print
/// one line (green on success, red on stderr on error) or one JSON object.
pub struct TerminalDisplay<'a> {
    ctx: &'a OutputContext,
    spinner: Option<ProgressBar>,
}

impl<'a> TerminalDisplay<'a> {
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx, spinner: None }
    }

    fn stop_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn start_spinner(&mut self, text: &str) {
        self.stop_spinner();
        if self.ctx.quiet || self.ctx.format != OutputFormat::Text {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(text.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(pb);
    }
}

impl DisplaySink for TerminalDisplay<'_> {
    fn render(&mut self, outcome: &Outcome) {
        match outcome.status {
            DisplayStatus::Neutral => self.stop_spinner(),
            DisplayStatus::Uploading => self.start_spinner(&outcome.text),
            DisplayStatus::Success | DisplayStatus::Error => {
                self.stop_spinner();
                match self.ctx.format {
                    OutputFormat::Json => self.ctx.print_json(outcome),
                    OutputFormat::Text if outcome.is_success() => self.ctx.success(&outcome.text),
                    OutputFormat::Text => self.ctx.error(&outcome.text),
                }
            }
        }
    }
}

impl Drop for TerminalDisplay<'_> {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}
