// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: A single deploy command driven entirely by flags.

use clap::Parser;
use std::path::PathBuf;
use webdeploy::config::{Environment, RunOptions};
use webdeploy::output::OutputMode;

#[derive(Parser)]
#[command(name = "webdeploy")]
#[command(about = "Build a web project and ship its output to the deployment host")]
#[command(version)]
pub struct Cli {
    /// Deploy with production intent (same host and build script as test)
    #[arg(long = "pro")]
    pub production: bool,

    /// SSH password for the deployment user
    #[arg(short = 'p', value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Skip the build step and ship the existing build output
    #[arg(short = 's')]
    pub skip_build: bool,

    /// SSH username [default: FEDAdmin]
    #[arg(short = 'u', value_name = "USER")]
    pub user: Option<String>,

    /// Project root containing package.json (defaults to the current directory)
    #[arg(short = 'C', long = "project-dir", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            user: self.user.clone(),
            password: self.password.clone(),
            skip_build: self.skip_build,
            environment: Environment::from_flag(self.production),
        }
    }
}
