// ABOUTME: Sequential runner for the deployment pipeline.
// ABOUTME: Stops at the first failing step without touching earlier results.

use super::{Stages, Step};
use crate::config::DeployConfig;
use crate::error::Result;
use crate::output::Output;

/// Run all five steps in order.
///
/// The first error is returned as-is. Steps that already completed are not
/// undone, so a failed upload leaves the remote directory cleared.
pub async fn run<S>(stages: &S, config: &DeployConfig, output: &Output) -> Result<()>
where
    S: Stages + ?Sized,
{
    output.progress(&format!("Deploying to {}", config.host));
    tracing::debug!(
        environment = %config.environment,
        remote_path = %config.remote_path,
        "starting deployment"
    );

    output.step(Step::Build);
    if config.skip_build {
        output.progress("Skipping build, using the existing build output");
    } else {
        stages.build(config, output).await?;
    }

    output.step(Step::Archive);
    stages.archive(config, output).await?;

    output.step(Step::ClearRemote);
    stages.clear_remote(config, output).await?;

    output.step(Step::Upload);
    stages.upload(config, output).await?;

    output.step(Step::Unpack);
    stages.unpack(config, output).await?;

    Ok(())
}
