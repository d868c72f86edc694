// ABOUTME: Trait for the units of work the pipeline runs.
// ABOUTME: Lets the runner drive real SSH-backed steps or test doubles.

use crate::config::DeployConfig;
use crate::error::Result;
use crate::output::Output;
use async_trait::async_trait;

/// The five steps of a deployment.
///
/// Each method runs to completion or returns the error that stops the run.
/// The runner never calls a method before the previous one has returned `Ok`.
#[async_trait]
pub trait Stages: Send + Sync {
    /// Run the project's build tool.
    async fn build(&self, config: &DeployConfig, output: &Output) -> Result<()>;

    /// Pack the build output into the local archive.
    async fn archive(&self, config: &DeployConfig, output: &Output) -> Result<()>;

    /// Create the remote target directory if needed and empty it.
    async fn clear_remote(&self, config: &DeployConfig, output: &Output) -> Result<()>;

    /// Copy the local archive into the remote target directory.
    async fn upload(&self, config: &DeployConfig, output: &Output) -> Result<()>;

    /// Extract the uploaded archive in place and delete it.
    async fn unpack(&self, config: &DeployConfig, output: &Output) -> Result<()>;
}
