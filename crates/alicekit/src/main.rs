//! Command-line shell around the alicekit cores.
//!
//! This binary is presentation glue only: it wires up logging, forwards one
//! tool invocation or update operation to the library crates, and prints the
//! result.

mod logging;

use std::process::ExitCode;

use alicekit_tools::ToolRunner;
use alicekit_update::{CURRENT_VERSION, UpdateChecker};
use log::{error, info};
use tokio::sync::mpsc;

const USAGE: &str = "\
Usage:
  alicekit run <tool> [argument-string]
  alicekit check-update
  alicekit self-update";

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("run") => match args.get(1) {
            Some(tool_name) => {
                let arguments = args.get(2).map_or("", String::as_str);
                run_tool(tool_name, arguments).await
            }
            None => usage(),
        },
        Some("check-update") => check_update().await,
        Some("self-update") => self_update().await,
        _ => usage(),
    }
}

fn usage() -> ExitCode {
    eprintln!("{USAGE}");
    ExitCode::from(2)
}

async fn run_tool(tool_name: &str, arguments: &str) -> ExitCode {
    match ToolRunner::new().run(tool_name, arguments).await {
        Ok(output) => {
            print!("{}", output.stdout);
            ExitCode::SUCCESS
        }
        Err(run_error) => {
            error!("Tool invocation failed: {run_error}");
            eprintln!("{run_error}");
            ExitCode::FAILURE
        }
    }
}

async fn check_update() -> ExitCode {
    let checker = UpdateChecker::new(reqwest::Client::new());
    let latest = checker.latest_version().await;

    if checker.has_newer_version().await {
        info!("Update available: {CURRENT_VERSION} -> {latest}");
        println!("Update available: {CURRENT_VERSION} -> {latest}");
    } else {
        info!("No newer version than {CURRENT_VERSION}");
        println!("Up to date ({CURRENT_VERSION})");
    }
    ExitCode::SUCCESS
}

async fn self_update() -> ExitCode {
    let (sender, mut receiver) = mpsc::channel::<alicekit_update::DownloadProgress>(16);
    let reporter = tokio::spawn(async move {
        while let Some(progress) = receiver.recv().await {
            println!("Downloading update: {}%", progress.percent);
        }
    });

    let checker = UpdateChecker::new(reqwest::Client::new());
    match checker.download_and_launch_installer(Some(sender)).await {
        Ok(never) => match never {},
        Err(update_error) => {
            reporter.abort();
            error!("Self-update failed: {update_error}");
            eprintln!("Update failed: {update_error}");
            ExitCode::FAILURE
        }
    }
}
