// ABOUTME: Runs the project's build tool before packaging.
// ABOUTME: Invokes `<program> run <script>` in the project directory and captures its output.

use crate::config::{BuildSettings, Environment};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Captured output of a successful build.
#[derive(Debug)]
pub struct BuildOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A single build invocation.
#[derive(Debug, Clone)]
pub struct BuildCommand {
    program: String,
    script: String,
    dir: PathBuf,
}

impl BuildCommand {
    pub fn new(settings: &BuildSettings, environment: Environment, dir: &Path) -> Self {
        Self {
            program: settings.program.clone(),
            script: settings.script_for(environment).to_string(),
            dir: dir.to_path_buf(),
        }
    }

    /// The command line as shown to the user.
    pub fn display(&self) -> String {
        format!("{} run {}", self.program, self.script)
    }

    /// Run the build to completion. A non-zero exit is an error.
    pub async fn run(&self) -> Result<BuildOutput> {
        tracing::debug!("Running `{}` in {}", self.display(), self.dir.display());

        let output = Command::new(&self.program)
            .arg("run")
            .arg(&self.script)
            .current_dir(&self.dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| Error::BuildSpawn {
                command: self.display(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(Error::BuildFailed {
                command: self.display(),
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(BuildOutput { stdout, stderr })
    }
}
