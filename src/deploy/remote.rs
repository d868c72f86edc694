// ABOUTME: Production implementation of the pipeline steps.
// ABOUTME: Local build and zip, then SSH sessions scoped around fixed command lists.

use super::Stages;
use crate::archive;
use crate::build::BuildCommand;
use crate::config::DeployConfig;
use crate::error::{Error, Result};
use crate::output::Output;
use crate::shell;
use crate::ssh::Session;
use async_trait::async_trait;

/// Commands that make sure the remote target exists and is empty.
///
/// Both are safe to repeat: `mkdir -p` tolerates an existing directory and
/// `rm -rf` tolerates an unmatched glob.
pub fn clear_commands(config: &DeployConfig) -> Vec<String> {
    let target = shell::quote(&config.remote_path);
    vec![format!("mkdir -p {}", target), format!("rm -rf {}/*", target)]
}

/// Commands that extract the uploaded archive over the target and remove it.
pub fn unpack_commands(config: &DeployConfig) -> Vec<String> {
    let target = shell::quote(&config.remote_path);
    let archive = shell::quote(&config.remote_archive_path());
    vec![
        format!("unzip -o -d {} {}", target, archive),
        format!("rm {}", archive),
    ]
}

/// Steps backed by the local build tool, the zip writer and SSH.
#[derive(Debug, Default)]
pub struct SshStages;

#[async_trait]
impl Stages for SshStages {
    async fn build(&self, config: &DeployConfig, output: &Output) -> Result<()> {
        let command = BuildCommand::new(&config.build, config.environment, &config.project_dir);
        let result = command.run().await?;
        output.detail(&result.stdout);
        if !result.stderr.trim().is_empty() {
            tracing::debug!("build stderr: {}", result.stderr.trim_end());
        }
        Ok(())
    }

    async fn archive(&self, config: &DeployConfig, output: &Output) -> Result<()> {
        let summary = archive::create_archive_async(&config.dist_dir, &config.archive_path()).await?;
        output.progress(&format!(
            "  → Packed {} files ({} bytes) into {}",
            summary.files,
            summary.bytes,
            summary.path.display()
        ));
        Ok(())
    }

    async fn clear_remote(&self, config: &DeployConfig, output: &Output) -> Result<()> {
        run_remote(config, &clear_commands(config), output).await
    }

    async fn upload(&self, config: &DeployConfig, output: &Output) -> Result<()> {
        output.progress(&format!(
            "  → {} → {}:{}",
            config.archive_path().display(),
            config.host,
            config.remote_archive_path()
        ));

        let session = Session::connect(config.session_config()).await?;
        let result = session
            .upload(
                &config.archive_path(),
                &config.remote_path,
                &config.archive_name,
            )
            .await
            .map_err(Error::Transfer);
        close(session, &config.host, output).await;

        let bytes = result?;
        tracing::debug!("Uploaded {} bytes", bytes);
        Ok(())
    }

    async fn unpack(&self, config: &DeployConfig, output: &Output) -> Result<()> {
        run_remote(config, &unpack_commands(config), output).await
    }
}

/// Open a session, run `commands` in order, and disconnect.
///
/// The session is closed whether or not a command fails.
async fn run_remote(config: &DeployConfig, commands: &[String], output: &Output) -> Result<()> {
    let session = Session::connect(config.session_config()).await?;
    let result = run_commands(&session, commands, output).await;
    close(session, &config.host, output).await;
    result
}

async fn run_commands(session: &Session, commands: &[String], output: &Output) -> Result<()> {
    for command in commands {
        let result = session.exec(command).await?;
        output.detail(&result.stdout);

        if !result.success() {
            return Err(Error::RemoteCommand {
                command: command.clone(),
                exit_code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }
    }
    Ok(())
}

/// Disconnect failures are reported, never fatal.
async fn close(session: Session, host: &str, output: &Output) {
    if let Err(e) = session.disconnect().await {
        tracing::warn!("SSH disconnect failed for {}: {}", host, e);
        output.warning(&format!("SSH disconnect failed for {}: {}", host, e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RunOptions, Settings};
    use crate::project::ProjectManifest;
    use std::path::Path;

    fn config(name: &str) -> DeployConfig {
        DeployConfig::new(
            Settings::default(),
            &ProjectManifest {
                name: name.to_string(),
            },
            Path::new("/work"),
            RunOptions::default(),
        )
    }

    #[test]
    fn clear_creates_then_empties_target() {
        assert_eq!(
            clear_commands(&config("portal")),
            vec![
                "mkdir -p '/home/FEDAdmin/www/portal'".to_string(),
                "rm -rf '/home/FEDAdmin/www/portal'/*".to_string(),
            ]
        );
    }

    #[test]
    fn unpack_overwrites_then_removes_archive() {
        assert_eq!(
            unpack_commands(&config("portal")),
            vec![
                "unzip -o -d '/home/FEDAdmin/www/portal' '/home/FEDAdmin/www/portal/archive.zip'"
                    .to_string(),
                "rm '/home/FEDAdmin/www/portal/archive.zip'".to_string(),
            ]
        );
    }

    #[test]
    fn project_name_cannot_break_out_of_quotes() {
        let commands = clear_commands(&config("x'; rm -rf ~; echo '"));
        assert_eq!(
            commands[1],
            "rm -rf '/home/FEDAdmin/www/x'\\''; rm -rf ~; echo '\\'''/*"
        );
    }
}
