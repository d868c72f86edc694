// ABOUTME: Resolved configuration for a single deployment run.
// ABOUTME: Merges settings, package.json metadata and command-line overrides.

use super::{BuildSettings, Environment, Settings};
use crate::error::Result;
use crate::project::ProjectManifest;
use crate::ssh::SessionConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Values taken from the command line.
#[derive(Clone, Default)]
pub struct RunOptions {
    pub user: Option<String>,
    pub password: Option<String>,
    pub skip_build: bool,
    pub environment: Environment,
}

impl fmt::Debug for RunOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOptions")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("skip_build", &self.skip_build)
            .field("environment", &self.environment)
            .finish()
    }
}

/// Everything a run needs, fixed before the first step starts.
#[derive(Clone)]
pub struct DeployConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    password: Option<String>,
    pub project_name: String,
    pub remote_path: String,
    pub environment: Environment,
    pub skip_build: bool,
    pub project_dir: PathBuf,
    pub dist_dir: PathBuf,
    pub archive_name: String,
    pub build: BuildSettings,
    pub trust_first_connection: bool,
    pub known_hosts: Option<PathBuf>,
    pub command_timeout: Duration,
    pub transfer_timeout: Duration,
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("remote_path", &self.remote_path)
            .field("environment", &self.environment)
            .field("skip_build", &self.skip_build)
            .field("dist_dir", &self.dist_dir)
            .finish_non_exhaustive()
    }
}

/// Remote target directory for a project: `<prefix>/<project-name>`.
pub fn remote_path(prefix: &str, project_name: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), project_name)
}

impl DeployConfig {
    pub fn new(
        settings: Settings,
        manifest: &ProjectManifest,
        project_dir: &Path,
        options: RunOptions,
    ) -> Self {
        Self {
            host: settings.host,
            port: settings.port,
            user: options.user.unwrap_or(settings.user),
            password: options.password,
            project_name: manifest.name.clone(),
            remote_path: remote_path(&settings.remote_prefix, &manifest.name),
            environment: options.environment,
            skip_build: options.skip_build,
            project_dir: project_dir.to_path_buf(),
            dist_dir: project_dir.join(settings.dist_dir),
            archive_name: settings.archive_name,
            build: settings.build,
            trust_first_connection: settings.trust_first_connection,
            known_hosts: settings.known_hosts,
            command_timeout: settings.command_timeout,
            transfer_timeout: settings.transfer_timeout,
        }
    }

    /// Read settings and package.json from `project_dir`.
    pub fn load(project_dir: &Path, options: RunOptions) -> Result<Self> {
        let settings = Settings::discover(project_dir)?;
        let manifest = ProjectManifest::load(project_dir)?;
        Ok(Self::new(settings, &manifest, project_dir, options))
    }

    /// Local path of the archive artifact.
    pub fn archive_path(&self) -> PathBuf {
        self.dist_dir.join(&self.archive_name)
    }

    /// Path of the uploaded archive on the remote host.
    pub fn remote_archive_path(&self) -> String {
        format!("{}/{}", self.remote_path, self.archive_name)
    }

    pub fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::new(&self.host, &self.user)
            .port(self.port)
            .trust_on_first_use(self.trust_first_connection)
            .command_timeout(self.command_timeout)
            .transfer_timeout(self.transfer_timeout);
        if let Some(password) = &self.password {
            config = config.password(password);
        }
        if let Some(path) = &self.known_hosts {
            config = config.known_hosts_path(path);
        }
        config
    }
}
