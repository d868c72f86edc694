// ABOUTME: Entry point for the webdeploy CLI application.
// ABOUTME: Parses flags, sets up logging, and reports the deployment outcome.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;
use webdeploy::output::Output;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(cli.output_mode());
    let options = cli.run_options();

    // Failures are reported, not turned into a non-zero exit status
    if let Err(e) = commands::deploy(cli.project_dir, options, &mut output).await {
        output.failure(&e.to_string());
    }
}
