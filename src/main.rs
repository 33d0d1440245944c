//! notify-probe - Email Notification Endpoint Smoke Tester
//!
//! A CLI tool that probes a hosted send-email-notification function with a
//! fixed battery of requests and reports pass/fail for each.
//!
//! ## Features
//!
//! - 6 probes covering every notification type, payload rejection, auth
//!   enforcement, and template rendering
//! - Strictly sequential execution with a pause between probes
//! - Text, JSON, and one-line summary output
//! - Debug mode that prints raw responses for edge-case payloads
//!
//! ## Usage
//!
//! ```bash
//! # Run the full battery (exit code 0 when every probe passes)
//! ENDPOINT_URL=https://<project>.supabase.co/functions/v1/send-email-notification \
//! API_TOKEN=<anon key> notify-probe
//!
//! # Run one probe
//! notify-probe run --probe template
//!
//! # Inspect how the endpoint handles malformed payloads
//! notify-probe debug --scenario empty-payload
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod probes;
mod utils;

use cli::{Args, Command};
use config::{EnvConfig, ProbeConfig};
use executor::ProbeRunner;
use models::{AuthMode, NotificationResponse};
use output::{OutputFormat, ResultFormatter};
use probes::{DebugScenario, Probe};
use utils::{init_logger, LogLevel};

/// Characters of the email preview shown by `debug`
const DEBUG_PREVIEW_CHARS: usize = 100;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let verbose = args.verbose || env.verbose.unwrap_or(false);
    init_logger(LogLevel::from_flags(verbose, args.quiet));
    debug!("Environment: {:?}", env);

    // `list` and `env` only use environment settings
    let config = if args.needs_config_file() {
        let config_path = args
            .config
            .clone()
            .or_else(|| env.config_file.as_ref().map(PathBuf::from));
        ProbeConfig::load(config_path.as_deref())?
    } else {
        ProbeConfig::default()
    }
    .merge_env(&env);

    match args.command {
        None => run_probes(cli::RunArgs::default(), config, &env).await,
        Some(Command::Run(run_args)) => run_probes(run_args, config, &env).await,
        Some(Command::List(list_args)) => {
            list_probes(list_args, &config);
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Debug(debug_args)) => {
            debug_payloads(debug_args, config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Env) => {
            config::print_env_help();
            println!();
            env.print_summary();
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_probes(args: cli::RunArgs, config: ProbeConfig, env: &EnvConfig) -> Result<ExitCode> {
    let mut config = config;
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(timeout);
    }
    if let Some(delay) = args.delay_ms {
        config = config.with_delay_ms(delay);
    }

    let format_name = args
        .format
        .as_deref()
        .or(env.format.as_deref())
        .unwrap_or("text");
    let format = OutputFormat::from_str(format_name)
        .with_context(|| format!("Unknown output format: {format_name}"))?;

    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }

    let test_cases = match args.probe.as_deref() {
        Some(name) => {
            let probe =
                Probe::parse(name).with_context(|| format!("Unknown probe: {name}"))?;
            vec![probe.test_case(&config.product_name)]
        }
        None => probes::battery(&config.product_name),
    };

    let runner = ProbeRunner::new(&config)?;

    if formatter.streams() {
        println!("{}", formatter.format_header());
    }

    let summary = runner
        .run_all(&test_cases, |result| {
            if formatter.streams() {
                println!("{}", formatter.format_result(result));
            }
        })
        .await;

    println!("{}", formatter.format_summary(&summary));

    Ok(ExitCode::from(summary.exit_code() as u8))
}

fn list_probes(args: cli::ListArgs, config: &ProbeConfig) {
    println!("\nNotification Probes ({} total)\n", Probe::all().len());

    for probe in Probe::all() {
        if args.detailed {
            let case = probe.test_case(&config.product_name);
            let auth = match case.auth {
                AuthMode::Credentials => "auth",
                AuthMode::Anonymous => "no auth",
            };
            println!(
                "  {}. {:35} {:18} [{}, expects {}]",
                probe.number(),
                probe.name(),
                probe.slug(),
                auth,
                case.expectation.label()
            );
        } else {
            println!("  {}. {}", probe.number(), probe.name());
        }
    }

    println!();
}

async fn debug_payloads(args: cli::DebugArgs, config: ProbeConfig) -> Result<()> {
    let config = match args.timeout {
        Some(timeout) => config.with_timeout(timeout),
        None => config,
    };

    let scenarios = match args.scenario.as_deref() {
        Some(name) => vec![DebugScenario::parse(name)
            .with_context(|| format!("Unknown scenario: {name}"))?],
        None => DebugScenario::all(),
    };

    let runner = ProbeRunner::new(&config)?;

    for (i, scenario) in scenarios.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== Test {}: {} ===", i + 1, scenario.title());

        let payload = scenario.payload();
        println!(
            "Payload: {}",
            serde_json::to_string_pretty(&payload).context("Failed to render payload")?
        );

        let resp = match runner.exchange(&payload, AuthMode::Credentials).await {
            Ok(resp) => resp,
            Err(e) => {
                println!("Exception: {e}");
                continue;
            }
        };

        println!("Status Code: {}", resp.status_code);
        println!("Response: {}", resp.body);

        match resp.json::<NotificationResponse>() {
            Ok(body) => {
                println!("Success: {}", body.success);
                println!("Error: {}", body.error.as_deref().unwrap_or("None"));
                println!("Details: {}", body.details.as_deref().unwrap_or("None"));
                println!(
                    "Email Preview: {}...",
                    body.preview_excerpt(DEBUG_PREVIEW_CHARS)
                );
            }
            Err(e) => println!("Body is not a notification response: {e}"),
        }
    }

    Ok(())
}
