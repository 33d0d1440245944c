//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Smoke-test prober for a hosted email-notification function
#[derive(Parser, Debug)]
#[command(name = "notify-probe")]
#[command(version)]
#[command(about = "Probe an email-notification endpoint and report pass/fail")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Whether the selected command sends requests and so needs the config file
    pub fn needs_config_file(&self) -> bool {
        match &self.command {
            None | Some(Command::Run(_)) | Some(Command::Debug(_)) => true,
            Some(Command::List(_)) | Some(Command::Env) => false,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the probe battery (default)
    Run(RunArgs),

    /// List the probes in the battery
    List(ListArgs),

    /// Send edge-case payloads and print the raw responses
    Debug(DebugArgs),

    /// Show recognised environment variables
    Env,
}

/// Arguments for run command
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Run a single probe by number (1-6) or name
    #[arg(short, long)]
    pub probe: Option<String>,

    /// Output format (text, json, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Pause between probes in milliseconds
    #[arg(short, long)]
    pub delay_ms: Option<u64>,

    /// Disable ANSI colours
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show expectations and auth mode
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for debug command
#[derive(Parser, Debug)]
pub struct DebugArgs {
    /// Only send this scenario (invalid-payload, invalid-type, missing-fields, empty-payload)
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,
}
