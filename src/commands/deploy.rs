// ABOUTME: Deploy command implementation.
// ABOUTME: Resolves the run configuration and drives the pipeline with SSH-backed steps.

use std::env;
use std::path::PathBuf;
use webdeploy::config::{DeployConfig, Environment, RunOptions};
use webdeploy::deploy::{self, SshStages};
use webdeploy::error::Result;
use webdeploy::output::Output;

/// Deploy the project in `project_dir` (or the current directory).
pub async fn deploy(
    project_dir: Option<PathBuf>,
    options: RunOptions,
    output: &mut Output,
) -> Result<()> {
    output.start_timer();

    let project_dir = match project_dir {
        Some(dir) => dir,
        None => env::current_dir()?,
    };

    let config = DeployConfig::load(&project_dir, options)?;
    tracing::debug!("Resolved configuration: {:?}", config);

    if config.environment == Environment::Production {
        tracing::info!(
            "--pro selected; deploying to the same host {} with script {}",
            config.host,
            config.build.script_for(config.environment)
        );
    }

    deploy::run(&SshStages, &config, output).await?;

    output.success("[Finished] Deployment succeeded");
    Ok(())
}
